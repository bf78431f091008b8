// Generated by jnibridge, do not edit!

#![allow(
    non_snake_case,
    unused_variables,
    clippy::let_and_return,
    clippy::let_unit_value,
    clippy::redundant_locals,
)]

use jnibridge_runtime::prelude::*;
use crate::api::{DbRef, SqliteApi, StatusCode};

#[unsafe(export_name = "Java_com_example_SqliteApi_openDatabase")]
pub extern "system" fn Java_com_example_SqliteApi_openDatabase(
    env: EnvHandle,
    clazz: ClassHandle,
    p0: NativeString,
) -> NativePointer {
    init_platform();
    run_with_exception_conversion(env, NativePointer::NULL, || {
        let localP0 = convert::string_from_native(env, p0)?;
        let callResult = SqliteApi::openDatabase(localP0)?;
        let localCallResult = DbRef::to_native(env, callResult)?;
        Ok(localCallResult)
    })
}

#[unsafe(export_name = "Java_com_example_SqliteApi_prepareStmt")]
pub extern "system" fn Java_com_example_SqliteApi_prepareStmt(
    env: EnvHandle,
    clazz: ClassHandle,
    p0: NativePointer,
    p1: NativeString,
) -> jint {
    init_platform();
    run_with_exception_conversion(env, -1, || {
        let localP0 = DbRef::from_native(env, p0)?;
        let localP1 = convert::string_from_native(env, p1)?;
        let callResult = SqliteApi::prepareStmt(localP0, localP1)?;
        let localCallResult = StatusCode::to_native(env, callResult)?;
        Ok(localCallResult)
    })
}

#[unsafe(export_name = "Java_com_example_SqliteApi_close")]
pub extern "system" fn Java_com_example_SqliteApi_close(
    env: EnvHandle,
    clazz: ClassHandle,
    p0: NativePointer,
) {
    init_platform();
    run_with_exception_conversion(env, (), || {
        let localP0 = DbRef::from_native(env, p0)?;
        let callResult = SqliteApi::close(localP0)?;
        Ok(callResult)
    })
}

#[unsafe(export_name = "Java_com_example_SqliteApi_libVersion")]
pub extern "system" fn Java_com_example_SqliteApi_libVersion(
    env: EnvHandle,
    clazz: ClassHandle,
) -> NativeString {
    init_platform();
    run_with_exception_conversion(env, NativeString::NULL, || {
        let callResult = SqliteApi::libVersion();
        let localCallResult = convert::string_to_native(env, callResult)?;
        Ok(localCallResult)
    })
}
