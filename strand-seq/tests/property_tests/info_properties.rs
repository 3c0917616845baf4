//! Property-based tests for the regex info engine
//!
//! This module tests the lattice laws of the property records:
//! - Determinism and idempotence of inference
//! - Star/opt nullability for arbitrary generated regexes
//! - Complement leaving the classical subset
//! - Minimum-length monotonicity under concatenation

use proptest::prelude::*;
use strand_core::{TermId, TermManager};
use strand_seq::{ReInfoEngine, SeqFacade, Ternary, ZString};

/// A regex recipe the strategy can generate without touching the managers.
#[derive(Debug, Clone)]
enum Recipe {
    Range(char, char),
    Literal(String),
    Star(Box<Recipe>),
    Opt(Box<Recipe>),
    Plus(Box<Recipe>),
    Concat(Box<Recipe>, Box<Recipe>),
    Union(Box<Recipe>, Box<Recipe>),
    Complement(Box<Recipe>),
    Loop(Box<Recipe>, u8, u8),
}

fn recipe_strategy() -> impl Strategy<Value = Recipe> {
    let leaf = prop_oneof![
        (prop::char::range('a', 'm'), prop::char::range('n', 'z'))
            .prop_map(|(lo, hi)| Recipe::Range(lo, hi)),
        "[a-z]{0,4}".prop_map(Recipe::Literal),
    ];
    leaf.prop_recursive(4, 24, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(|r| Recipe::Star(Box::new(r))),
            inner.clone().prop_map(|r| Recipe::Opt(Box::new(r))),
            inner.clone().prop_map(|r| Recipe::Plus(Box::new(r))),
            (inner.clone(), inner.clone())
                .prop_map(|(a, b)| Recipe::Concat(Box::new(a), Box::new(b))),
            (inner.clone(), inner.clone())
                .prop_map(|(a, b)| Recipe::Union(Box::new(a), Box::new(b))),
            inner.clone().prop_map(|r| Recipe::Complement(Box::new(r))),
            (inner, 0u8..3, 3u8..6)
                .prop_map(|(r, lo, hi)| Recipe::Loop(Box::new(r), lo, hi)),
        ]
    })
}

fn build(tm: &mut TermManager, f: &mut SeqFacade, recipe: &Recipe) -> TermId {
    match recipe {
        Recipe::Range(lo, hi) => {
            let lo = f.mk_string(tm, &ZString::from_code_point(*lo as u32).expect("char"));
            let hi = f.mk_string(tm, &ZString::from_code_point(*hi as u32).expect("char"));
            f.mk_range(tm, lo, hi).expect("range")
        }
        Recipe::Literal(text) => {
            let s = f.mk_string(tm, &ZString::parse(text).expect("literal"));
            f.mk_to_re(tm, s).expect("to_re")
        }
        Recipe::Star(r) => {
            let r = build(tm, f, r);
            f.mk_re_star(tm, r).expect("star")
        }
        Recipe::Opt(r) => {
            let r = build(tm, f, r);
            f.mk_re_opt(tm, r).expect("opt")
        }
        Recipe::Plus(r) => {
            let r = build(tm, f, r);
            f.mk_re_plus(tm, r).expect("plus")
        }
        Recipe::Concat(a, b) => {
            let a = build(tm, f, a);
            let b = build(tm, f, b);
            f.mk_re_concat(tm, a, b).expect("concat")
        }
        Recipe::Union(a, b) => {
            let a = build(tm, f, a);
            let b = build(tm, f, b);
            f.mk_re_union(tm, a, b).expect("union")
        }
        Recipe::Complement(r) => {
            let r = build(tm, f, r);
            f.mk_re_complement(tm, r).expect("complement")
        }
        Recipe::Loop(r, lo, hi) => {
            let r = build(tm, f, r);
            f.mk_re_loop(tm, r, u64::from(*lo), u64::from(*hi))
                .expect("loop")
        }
    }
}

proptest! {
    /// Inference is deterministic and idempotent per term identity.
    #[test]
    fn info_deterministic(recipe in recipe_strategy()) {
        let mut tm = TermManager::new();
        let mut f = SeqFacade::new(&mut tm);
        let re = build(&mut tm, &mut f, &recipe);

        let mut engine = ReInfoEngine::new();
        let first = engine.info(&tm, re);
        let second = engine.info(&tm, re);
        prop_assert_eq!(first, second);

        let mut fresh = ReInfoEngine::new();
        prop_assert_eq!(fresh.info(&tm, re), first);
    }

    /// star(r) and opt(r) accept the empty word for every generated r.
    #[test]
    fn star_and_opt_nullable(recipe in recipe_strategy()) {
        let mut tm = TermManager::new();
        let mut f = SeqFacade::new(&mut tm);
        let re = build(&mut tm, &mut f, &recipe);
        let star = f.mk_re_star(&mut tm, re).expect("star");
        let opt = f.mk_re_opt(&mut tm, re).expect("opt");

        let mut engine = ReInfoEngine::new();
        let star_props = engine.info(&tm, star).props().copied().expect("known");
        prop_assert_eq!(star_props.nullable, Ternary::True);
        prop_assert_eq!(star_props.min_length, 0);
        let opt_props = engine.info(&tm, opt).props().copied().expect("known");
        prop_assert_eq!(opt_props.nullable, Ternary::True);
    }

    /// complement(r) is never classical, whatever r's record says.
    #[test]
    fn complement_never_classical(recipe in recipe_strategy()) {
        let mut tm = TermManager::new();
        let mut f = SeqFacade::new(&mut tm);
        let re = build(&mut tm, &mut f, &recipe);
        let comp = f.mk_re_complement(&mut tm, re).expect("complement");

        let mut engine = ReInfoEngine::new();
        let props = engine.info(&tm, comp).props().copied().expect("known");
        prop_assert!(!props.classical);
    }

    /// concat can only lengthen the shortest accepted word.
    #[test]
    fn concat_min_length_monotone(a in recipe_strategy(), b in recipe_strategy()) {
        let mut tm = TermManager::new();
        let mut f = SeqFacade::new(&mut tm);
        let ra = build(&mut tm, &mut f, &a);
        let rb = build(&mut tm, &mut f, &b);
        let cat = f.mk_re_concat(&mut tm, ra, rb).expect("concat");

        let mut engine = ReInfoEngine::new();
        let pa = engine.info(&tm, ra).props().copied().expect("known");
        let pb = engine.info(&tm, rb).props().copied().expect("known");
        let pc = engine.info(&tm, cat).props().copied().expect("known");
        prop_assert!(pc.min_length >= pa.min_length.max(pb.min_length)
            || pc.min_length == u64::MAX);
        prop_assert_eq!(pc.star_height, pa.star_height.max(pb.star_height));
    }
}
