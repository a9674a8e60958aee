//! Activation through writes and read gating.

use super::Harness;
use crate::routine::{Cond, Stmt};
use basalt_ir::{Init, ScalarLit, TypeShape};
use pretty_assertions::assert_eq;

#[test]
fn write_then_read_same_member() {
    let mut h = Harness::new();
    let u = h.int_float_union();
    let result = h
        .run(
            "t",
            vec![
                h.declare("u", &u, Init::Default),
                h.write("u", &["a"], ScalarLit::Int(10)),
                h.ret_read("u", &["a"]),
            ],
        )
        .expect("active member read succeeds");
    assert_eq!(result.as_int(), Some(10));
}

#[test]
fn read_of_other_member_reports_active() {
    let mut h = Harness::new();
    let u = h.int_float_union();
    let err = h
        .run(
            "foo",
            vec![
                h.declare("u", &u, Init::Default),
                h.write("u", &["a"], ScalarLit::Int(10)),
                h.ret_read("u", &["b"]),
            ],
        )
        .expect_err("b is not the active member");
    assert_eq!(
        err.to_string(),
        "read of member 'b' of union with active member 'a'"
    );
}

#[test]
fn repeated_reads_do_not_disturb_activation() {
    let mut h = Harness::new();
    let u = h.int_float_union();
    let result = h
        .run(
            "idempotent",
            vec![
                h.declare("u", &u, Init::Default),
                h.write("u", &["a"], ScalarLit::Int(10)),
                Stmt::If {
                    cond: Cond::Eq(h.path("u", &["a"]), ScalarLit::Int(10)),
                    then_body: vec![h.ret_read("u", &["a"])],
                },
            ],
        )
        .expect("both reads see the same active member");
    assert_eq!(result.as_int(), Some(10));
}

#[test]
fn write_switches_active_member() {
    let mut h = Harness::new();
    let u = h.int_float_union();
    let err = h
        .run(
            "switch",
            vec![
                h.declare("u", &u, Init::Default),
                h.write("u", &["a"], ScalarLit::Int(10)),
                h.write("u", &["b"], ScalarLit::Float(1.5)),
                h.ret_read("u", &["a"]),
            ],
        )
        .expect_err("a was deactivated by the write to b");
    assert_eq!(
        err.to_string(),
        "read of member 'a' of union with active member 'b'"
    );
}

#[test]
fn partial_struct_write_leaves_sibling_uninitialized() {
    let mut h = Harness::new();
    // union { struct { int x; int y; } a; int b; }
    let inner = h.struct_shape(
        "A",
        vec![
            h.member("x", TypeShape::int()),
            h.member("y", TypeShape::int()),
        ],
    );
    let u = h.union_shape(
        "U",
        vec![h.member("a", inner), h.member("b", TypeShape::int())],
    );
    let err = h
        .run(
            "foo3",
            vec![
                h.declare("u", &u, Init::Default),
                h.write("u", &["a", "y"], ScalarLit::Int(10)),
                h.ret_read("u", &["a", "x"]),
            ],
        )
        .expect_err("x was never written");
    assert_eq!(err.to_string(), "read of uninitialized object");
}

#[test]
fn nested_union_write_activates_the_chain() {
    let mut h = Harness::new();
    let u = h.int_float_union();
    let u2 = h.union_shape(
        "U2",
        vec![h.member("u", u), h.member("x", TypeShape::int())],
    );
    let mut body = vec![
        h.declare("u2", &u2, Init::Default),
        h.write("u2", &["u", "a"], ScalarLit::Int(10)),
        h.ret_read("u2", &["u", "a"]),
    ];
    let result = h.run("nested", body.clone()).expect("chain is active");
    assert_eq!(result.as_int(), Some(10));

    // The sibling of the inner union's active member is still gated.
    body.pop();
    body.push(h.ret_read("u2", &["u", "b"]));
    let err = h.run("nested_b", body).expect_err("b is inactive");
    assert_eq!(
        err.to_string(),
        "read of member 'b' of union with active member 'a'"
    );
}

#[test]
fn first_inactive_segment_wins() {
    let mut h = Harness::new();
    let u = h.int_float_union();
    let u2 = h.union_shape(
        "U2",
        vec![h.member("u", u), h.member("x", TypeShape::int())],
    );
    // With `x` active, the mismatch is reported at `.u`, not `.u.a`.
    let err = h
        .run(
            "foo4",
            vec![
                h.declare("u2", &u2, Init::Default),
                h.write("u2", &["x"], ScalarLit::Int(10)),
                h.ret_read("u2", &["u", "a"]),
            ],
        )
        .expect_err("u is not the active member");
    assert_eq!(
        err.to_string(),
        "read of member 'u' of union with active member 'x'"
    );
}
