//! Integer helpers for the demo, instrumented like the workload but outside
//! its project root.

use playback::{locals, site, Hook};

pub fn pow(hook: &Hook<'_>, base: i64, exp: u32) -> i64 {
    hook.call(site!("pow"), &locals![base, exp]);
    let mut acc = 1i64;
    for _ in 0..exp {
        hook.line(site!("pow"), &locals![base, exp, acc]);
        acc = mul(hook, acc, base);
    }
    hook.ret(site!("pow"), &locals![base, exp, acc], acc)
}

fn mul(hook: &Hook<'_>, a: i64, b: i64) -> i64 {
    hook.call(site!("mul"), &locals![a, b]);
    hook.ret(site!("mul"), &locals![a, b], a * b)
}
