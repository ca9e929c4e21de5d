//! The built-in function table.
//!
//! Names match the ones existing resource templates already call, so they are
//! kept as is rather than renamed to Rust conventions.

use serde_json::Value;

use super::args;
use super::{CallContext, FunctionEntry, Param, Signature};
use crate::core::Result;
use crate::funcs;

const M: Param = Param::required("m");
const KEY: Param = Param::required("key");
const DEFAULT: Param = Param::optional("default");
const VALUE: Param = Param::required("value");
const SOURCES: Param = Param::variadic("sources");
const S: Param = Param::required("s");
const OLD: Param = Param::required("old");
const NEW: Param = Param::required("new");
const REGEX: Param = Param::required("regex");
const REPL: Param = Param::required("repl");
const ARGS: Param = Param::variadic("args");
const START: Param = Param::required("start");
const LENGTH: Param = Param::required("length");

const fn entry(
    name: &'static str,
    params: &'static [Param],
    summary: &'static str,
    func: super::FuncImpl,
) -> FunctionEntry {
    FunctionEntry {
        name,
        signature: Signature {
            params,
        },
        summary,
        func,
    }
}

/// Every built-in function, in registration order.
pub(super) const BUILTINS: &[FunctionEntry] = &[
    entry(
        "get",
        &[M, KEY, DEFAULT],
        "Look up a dotted path, falling back to default or null",
        get,
    ),
    entry("has", &[M, KEY], "True if a dotted path is set", has),
    entry("hcl", &[VALUE], "Encode a value as HCL", hcl),
    entry(
        "hclField",
        &[M, KEY],
        "Encode `key = value` if key is present, else nothing",
        hcl_field,
    ),
    entry("merge", &[SOURCES], "Deep merge mappings, later wins", merge),
    entry(
        "replace",
        &[S, OLD, NEW],
        "Replace every occurrence of old with new",
        replace,
    ),
    entry(
        "resourceName",
        &[M, KEY],
        "Sanitized resource identifier from resource_name or key",
        resource_name,
    ),
    entry("now", &[], "Current time as RFC 3339 text", now),
    entry("trimSpace", &[S], "Strip surrounding whitespace", trim_space),
    entry(
        "regexReplaceAll",
        &[REGEX, S, REPL],
        "Replace every regex match, $1 references groups",
        regex_replace_all,
    ),
    entry("makeSlice", &[ARGS], "Collect the arguments into a list", make_slice),
    entry(
        "schemaDescription",
        &[S],
        "Quote a description, heredoc if multi-line",
        schema_description,
    ),
    entry(
        "substr",
        &[S, START, LENGTH],
        "Substring by byte offset, clamped at the end",
        substr,
    ),
    entry("getEncodedJSON", &[M], "Mapping as compact JSON", encoded_json),
    entry(
        "getEncodedEscapedJSON",
        &[M],
        "Mapping as JSON escaped for a quoted string",
        encoded_escaped_json,
    ),
    entry("uuid", &[], "Random version 4 UUID", uuid),
];

fn get(_: &CallContext<'_>, a: &[Value]) -> Result<Value> {
    let m = args::mapping(a, 0, "m")?;
    let key = args::string(a, 1, "key")?;
    funcs::get(&m, key, a.get(2))
}

fn has(_: &CallContext<'_>, a: &[Value]) -> Result<Value> {
    let m = args::mapping(a, 0, "m")?;
    Ok(Value::Bool(funcs::has(&m, args::string(a, 1, "key")?)?))
}

fn hcl(_: &CallContext<'_>, a: &[Value]) -> Result<Value> {
    funcs::encode(args::any(a, 0, "value")?).map(Value::String)
}

fn hcl_field(_: &CallContext<'_>, a: &[Value]) -> Result<Value> {
    let m = args::mapping(a, 0, "m")?;
    funcs::encode_field(&m, args::string(a, 1, "key")?).map(Value::String)
}

fn merge(_: &CallContext<'_>, a: &[Value]) -> Result<Value> {
    let sources =
        (0..a.len()).map(|i| args::mapping(a, i, "sources")).collect::<Result<Vec<_>>>()?;
    Ok(Value::Object(funcs::merge(sources.iter().map(|m| &**m))))
}

fn replace(_: &CallContext<'_>, a: &[Value]) -> Result<Value> {
    let s = args::string(a, 0, "s")?;
    let old = args::string(a, 1, "old")?;
    let new = args::string(a, 2, "new")?;
    Ok(Value::String(funcs::replace(s, old, new)))
}

fn resource_name(_: &CallContext<'_>, a: &[Value]) -> Result<Value> {
    let m = args::mapping(a, 0, "m")?;
    funcs::resource_name(&m, args::string(a, 1, "key")?).map(Value::String)
}

fn now(ctx: &CallContext<'_>, _: &[Value]) -> Result<Value> {
    Ok(Value::String(ctx.clock.now_rfc3339()))
}

fn trim_space(_: &CallContext<'_>, a: &[Value]) -> Result<Value> {
    Ok(Value::String(funcs::trim_space(args::string(a, 0, "s")?)))
}

fn regex_replace_all(_: &CallContext<'_>, a: &[Value]) -> Result<Value> {
    let pattern = args::string(a, 0, "regex")?;
    let s = args::string(a, 1, "s")?;
    let repl = args::string(a, 2, "repl")?;
    funcs::regex_replace_all(pattern, s, repl).map(Value::String)
}

fn make_slice(_: &CallContext<'_>, a: &[Value]) -> Result<Value> {
    Ok(funcs::make_slice(a))
}

fn schema_description(_: &CallContext<'_>, a: &[Value]) -> Result<Value> {
    Ok(Value::String(funcs::format_description(args::string(a, 0, "s")?)))
}

fn substr(_: &CallContext<'_>, a: &[Value]) -> Result<Value> {
    let s = args::string(a, 0, "s")?;
    let start = args::integer(a, 1, "start")?;
    let length = args::integer(a, 2, "length")?;
    funcs::substr(s, start, length).map(Value::String)
}

fn encoded_json(_: &CallContext<'_>, a: &[Value]) -> Result<Value> {
    let m = args::mapping(a, 0, "m")?;
    funcs::to_json(&m).map(Value::String)
}

fn encoded_escaped_json(_: &CallContext<'_>, a: &[Value]) -> Result<Value> {
    let m = args::mapping(a, 0, "m")?;
    funcs::to_escaped_json(&m).map(Value::String)
}

fn uuid(ctx: &CallContext<'_>, _: &[Value]) -> Result<Value> {
    Ok(Value::String(ctx.ids.uuid().to_string()))
}
