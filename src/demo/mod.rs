//! Sample workload recorded by the `playback` binary.
//!
//! Every function reports its own call, lines and return through the hook.
//! `crate::numeric` is instrumented the same way but lives outside
//! [`PROJECT_ROOT`], so it stands in for third-party code.

use std::cell::Cell;
use std::rc::{Rc, Weak};

use playback::{locals, site, Hook, Inspect, Instance, Value};

use crate::numeric;

/// `file!()` prefix of the files that count as the traced project.
pub const PROJECT_ROOT: &str = "src/demo/";

/// Accumulator that keeps a reference to itself.
pub struct Adder {
    added: Cell<i64>,
    this: Weak<Adder>,
}

impl Adder {
    pub fn new(hook: &Hook<'_>) -> Rc<Self> {
        hook.call(site!("Adder::new"), &locals![]);
        hook.line(site!("Adder::new"), &locals![]);
        let adder = Rc::new_cyclic(|this| Adder {
            added: Cell::new(0),
            this: this.clone(),
        });
        hook.ret(site!("Adder::new"), &locals![], adder)
    }

    pub fn add(self: &Rc<Self>, hook: &Hook<'_>, a: i64, b: i64) {
        let this = self.clone();
        hook.call(site!("Adder::add"), &locals![this, a, b]);
        hook.line(site!("Adder::add"), &locals![this, a, b]);
        self.added.set(self.added.get() + a + b);
        hook.ret(site!("Adder::add"), &locals![this, a, b], ());
    }

    pub fn get_added(self: &Rc<Self>, hook: &Hook<'_>) -> i64 {
        let this = self.clone();
        hook.call(site!("Adder::get_added"), &locals![this]);
        hook.line(site!("Adder::get_added"), &locals![this]);
        let adder = Adder::new(hook);
        hook.line(site!("Adder::get_added"), &locals![this, adder]);
        adder.add(hook, self.added.get(), self.added.get());
        hook.line(site!("Adder::get_added"), &locals![this, adder]);
        hook.ret(
            site!("Adder::get_added"),
            &locals![this, adder],
            self.added.get(),
        )
    }
}

impl Inspect for Adder {
    fn type_name(&self) -> &str {
        "Adder"
    }

    fn fields(&self) -> Vec<(String, Value)> {
        vec![
            ("added".to_string(), self.added.get().into()),
            ("ref".to_string(), self.this.upgrade().into()),
        ]
    }
}

pub fn test_func(hook: &Hook<'_>) -> i64 {
    hook.call(site!("test_func"), &locals![]);
    hook.line(site!("test_func"), &locals![]);
    let x = 10 + 10;
    hook.line(site!("test_func"), &locals![x]);
    let y = 20 + x;
    hook.line(site!("test_func"), &locals![x, y]);
    let adder = Adder::new(hook);
    adder.add(hook, x, y);
    hook.line(site!("test_func"), &locals![x, y, adder]);
    let added = adder.get_added(hook);
    hook.ret(site!("test_func"), &locals![x, y, adder], added)
}

/// Builds `a -> c -> b -> a` out of dynamic instances.
pub fn test_cycle(hook: &Hook<'_>) {
    hook.call(site!("test_cycle"), &locals![]);
    hook.line(site!("test_cycle"), &locals![]);
    let a = Instance::new("A");
    a.set("c", Value::None);
    hook.line(site!("test_cycle"), &locals![a]);
    let b = Instance::new("B");
    b.set("a", a.clone());
    hook.line(site!("test_cycle"), &locals![a, b]);
    let c = Instance::new("C");
    c.set("b", b.clone());
    hook.line(site!("test_cycle"), &locals![a, b, c]);
    a.set("c", c.clone());
    hook.line(site!("test_cycle"), &locals![a, b, c]);
    hook.ret(site!("test_cycle"), &locals![a, b, c], ());
}

pub fn ident(hook: &Hook<'_>, i: &str) -> String {
    hook.call(site!("ident"), &locals![i]);
    hook.line(site!("ident"), &locals![i]);
    hook.ret(site!("ident"), &locals![i], i.to_string())
}

pub fn main(hook: &Hook<'_>) {
    hook.call(site!("main"), &locals![]);
    hook.line(site!("main"), &locals![]);
    test_func(hook);
    hook.line(site!("main"), &locals![]);
    let i = ident(hook, "hi");
    hook.line(site!("main"), &locals![i]);
    println!("Printing: {i}");
    hook.line(site!("main"), &locals![i]);
    let x = numeric::pow(hook, 10, 12);
    hook.line(site!("main"), &locals![i, x]);
    test_cycle(hook);
    hook.ret(site!("main"), &locals![i, x], ());
}
