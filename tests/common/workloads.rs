//! Instrumented functions used as traced workloads.

use playback::{locals, site, Hook, Instance, Opaque, Value};

pub fn add_one(hook: &Hook<'_>, x: i64) -> i64 {
    hook.call(site!("add_one"), &locals![x]);
    hook.line(site!("add_one"), &locals![x]);
    hook.ret(site!("add_one"), &locals![x], x + 1)
}

/// Links `a -> c -> b -> a` and returns `a`.
pub fn build_cycle(hook: &Hook<'_>) -> Value {
    hook.call(site!("build_cycle"), &locals![]);
    let a = Instance::new("A");
    let b = Instance::new("B");
    let c = Instance::new("C");
    hook.line(site!("build_cycle"), &locals![a, b, c]);
    b.set("a", a.clone());
    c.set("b", b.clone());
    a.set("c", c.clone());
    hook.line(site!("build_cycle"), &locals![a, b, c]);
    hook.ret(site!("build_cycle"), &locals![], Value::object(&a))
}

/// Fails after touching an unencodable handle.
pub fn open_and_fail(hook: &Hook<'_>) -> Result<(), String> {
    hook.call(site!("open_and_fail"), &locals![]);
    let sink = std::io::sink();
    let handle = Value::from(Opaque::of(&sink));
    hook.line(site!("open_and_fail"), &locals![handle]);
    hook.exception(site!("open_and_fail"), &locals![]);
    Err("disk on fire".to_string())
}

pub fn call_library(hook: &Hook<'_>) -> i64 {
    hook.call(site!("call_library"), &locals![]);
    hook.line(site!("call_library"), &locals![]);
    let n = library_len(hook, "abc");
    hook.line(site!("call_library"), &locals![n]);
    hook.ret(site!("call_library"), &locals![n], n)
}

/// Reports itself from a file outside the fixture root.
fn library_len(hook: &Hook<'_>, s: &str) -> i64 {
    let site = |line| playback::Site::new("/vendor/strings/src/lib.rs", line, "len");
    hook.call(site(10), &locals![s]);
    hook.line(site(11), &locals![s]);
    hook.ret(site(12), &locals![s], s.len() as i64)
}

/// Reports a line from a project file that does not exist on disk.
pub fn ghost_line(hook: &Hook<'_>) {
    hook.line(
        playback::Site::new("tests/common/ghost.rs", 3, "ghost"),
        &locals![],
    );
}
