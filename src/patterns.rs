//! Named extraction patterns for all parity scanners.
//!
//! Every pattern that drives structural extraction lives in this table so the
//! full lexical surface of the tool is auditable in one place, and each idiom
//! carries its own fixture test. These are lexical patterns, not grammars:
//! on the C side a match inside a comment or string literal still counts, and
//! the Lua comment stripping in [`crate::usage`] is heuristic substitution.
//! That noise is accepted and documented, never silently corrected.

use once_cell::sync::Lazy;
use regex::Regex;

/// Registration idiom (a): explicit binder taking the interpreter handle and
/// a literal global name. Captures the name.
pub static RE_SET_GLOBAL_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"smlua_set_global_function\s*\(\s*L\s*,\s*"([^"]+)""#).unwrap()
});

/// Registration idiom (b): the bind-function binder. Captures the name.
pub static RE_BIND_FUNCTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"smlua_bind_function\s*\(\s*L\s*,\s*"([^"]+)""#).unwrap());

/// Registration idiom (c): push a native function pointer, then assign it to
/// a literal global name. Whitespace between the two statements may span
/// lines. Captures the name.
pub static RE_PUSH_THEN_SET_GLOBAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"lua_pushcfunction\s*\(\s*L\s*,\s*[A-Za-z_][A-Za-z0-9_]*\s*\)\s*;\s*lua_setglobal\s*\(\s*L\s*,\s*"([^"]+)"\s*\)"#,
    )
    .unwrap()
});

/// First enclosing block of the event-hook enumeration. Captures the body.
pub static RE_EVENT_HOOK_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)enum\s+LuaHookedEventType\s*\{(.*?)\}\s*;").unwrap());

/// First enclosing block of the action-hook enumeration. Captures the body.
pub static RE_ACTION_HOOK_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)enum\s+LuaActionHookType\s*\{(.*?)\}\s*;").unwrap());

/// Line-leading event-hook enumerator inside an enum body.
pub static RE_EVENT_HOOK_MEMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*(HOOK_[A-Z0-9_]+),").unwrap());

/// Line-leading action-hook enumerator inside an enum body.
pub static RE_ACTION_HOOK_MEMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*(ACTION_HOOK_[A-Z0-9_]+),").unwrap());

/// Identifier immediately followed by an opening call parenthesis.
pub static RE_CALL_IDENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Za-z_][A-Za-z0-9_]*)\s*\(").unwrap());

/// Bare hook-shaped token. `\b` keeps `ACTION_HOOK_*` from matching, since
/// the underscore before `HOOK` is itself a word character.
pub static RE_HOOK_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(HOOK_[A-Z0-9_]+)\b").unwrap());

/// Hook dispatch helper token, by naming convention.
pub static RE_HOOK_CALLSITE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(smlua_call_[A-Za-z0-9_]+)\b").unwrap());

/// Lua block comment, non-greedy, may span lines.
pub static RE_LUA_BLOCK_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)--\[\[.*?\]\]").unwrap());

/// Lua line comment, applied per line after block stripping.
pub static RE_LUA_LINE_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"--.*$").unwrap());

/// Sentinel enumerators mark the enumeration bound, not a real hook.
pub fn is_sentinel_enumerator(name: &str) -> bool {
    name.ends_with("_MAX")
}
