//! Sequence/String/Regex Theory Plugin.
//!
//! The authoritative sort and operator namespace for the theory. The plugin
//! validates sort requests, resolves polymorphic operator requests through
//! the signature matcher, constructs canonical string and character
//! constants, exposes the builtin-name tables per logic, and decides value
//! and equality semantics for constant applications.
//!
//! Sort canonicalization: the `String` and `RegLan` request kinds resolve to
//! the one `Seq(Char)` / `Re(Seq(Char))` sort object, so a string built
//! generically over the `Char`-element sequence sort and one built through
//! the string operators share sorts and declarations.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use strand_core::{
    DeclId, DeclParam, FuncDecl, Result, SortId, SortKind, StrandError, TermId, TermManager,
};
use tracing::{debug, trace};

use crate::ops::SeqOp;
use crate::signature::{match_assoc, match_signature, Assoc, Signature, SortPattern};
use crate::zstring::{ZString, MAX_CHAR};

/// Logic names whose builtin tables this plugin serves.
pub const SUPPORTED_LOGICS: &[&str] = &["", "ALL", "QF_S", "QF_SLIA"];

/// The sequence theory plugin.
#[derive(Debug)]
pub struct SeqPlugin {
    sigs: FxHashMap<u32, Vec<Signature>>,
    char_sort: SortId,
    string_sort: SortId,
    reglan_sort: SortId,
    has_seq: bool,
    has_re: bool,
}

impl SeqPlugin {
    /// Initialize the plugin, interning the special sorts and registering
    /// the signature table. Signatures are immutable afterwards.
    pub fn new(tm: &mut TermManager) -> Self {
        let char_sort = tm.sorts.intern(SortKind::Char, &[]);
        let string_sort = tm.sorts.intern(SortKind::Seq, &[char_sort]);
        let reglan_sort = tm.sorts.intern(SortKind::Re, &[string_sort]);
        let mut plugin = Self {
            sigs: FxHashMap::default(),
            char_sort,
            string_sort,
            reglan_sort,
            has_seq: false,
            has_re: false,
        };
        plugin.register_signatures(tm);
        plugin
    }

    /// The canonical character sort.
    #[must_use]
    pub fn char_sort(&self) -> SortId {
        self.char_sort
    }

    /// The canonical string sort (`Seq(Char)`).
    #[must_use]
    pub fn string_sort(&self) -> SortId {
        self.string_sort
    }

    /// The canonical regular-language sort (`Re(Seq(Char))`).
    #[must_use]
    pub fn reglan_sort(&self) -> SortId {
        self.reglan_sort
    }

    /// Whether any sequence sort or operator has been created.
    #[must_use]
    pub fn has_seq(&self) -> bool {
        self.has_seq
    }

    /// Whether any regex sort or operator has been created.
    #[must_use]
    pub fn has_re(&self) -> bool {
        self.has_re
    }

    fn register_signatures(&mut self, tm: &mut TermManager) {
        use SortPattern::{Exact, Param, Shape};
        let int = Exact(tm.sorts.int_sort);
        let boolean = Exact(tm.sorts.bool_sort);
        let string = Exact(self.string_sort);
        let ch = Exact(self.char_sort);
        let elem = || Param(0);
        let seq = || Shape(SortKind::Seq, vec![Param(0)]);
        let re = || Shape(SortKind::Re, vec![Shape(SortKind::Seq, vec![Param(0)])]);

        let mut add = |op: SeqOp, sig: Signature| {
            self.sigs.entry(op.code()).or_default().push(sig);
        };
        let sig1 = |name, dom: Vec<SortPattern>, range: SortPattern| Signature {
            name,
            num_params: 1,
            domain: dom,
            range,
        };
        let sig0 = |name, dom: Vec<SortPattern>, range: SortPattern| Signature {
            name,
            num_params: 0,
            domain: dom,
            range,
        };

        add(SeqOp::SeqUnit, sig1("seq.unit", vec![elem()], seq()));
        add(SeqOp::SeqEmpty, sig1("seq.empty", vec![], seq()));
        add(SeqOp::SeqConcat, sig1("seq.++", vec![seq()], seq()));
        add(
            SeqOp::SeqPrefix,
            sig1("seq.prefixof", vec![seq(), seq()], boolean.clone()),
        );
        add(
            SeqOp::SeqSuffix,
            sig1("seq.suffixof", vec![seq(), seq()], boolean.clone()),
        );
        add(
            SeqOp::SeqContains,
            sig1("seq.contains", vec![seq(), seq()], boolean.clone()),
        );
        add(
            SeqOp::SeqExtract,
            sig1(
                "seq.extract",
                vec![seq(), int.clone(), int.clone()],
                seq(),
            ),
        );
        add(
            SeqOp::SeqReplace,
            sig1("seq.replace", vec![seq(), seq(), seq()], seq()),
        );
        add(SeqOp::SeqAt, sig1("seq.at", vec![seq(), int.clone()], seq()));
        add(SeqOp::SeqNth, sig1("seq.nth", vec![seq(), int.clone()], elem()));
        add(
            SeqOp::SeqNthI,
            sig1("seq.nth_i", vec![seq(), int.clone()], elem()),
        );
        add(
            SeqOp::SeqNthU,
            sig1("seq.nth_u", vec![seq(), int.clone()], elem()),
        );
        add(SeqOp::SeqLength, sig1("seq.len", vec![seq()], int.clone()));
        add(
            SeqOp::SeqIndex,
            sig1(
                "seq.indexof",
                vec![seq(), seq(), int.clone()],
                int.clone(),
            ),
        );
        add(
            SeqOp::SeqIndex,
            sig1("seq.indexof", vec![seq(), seq()], int.clone()),
        );
        add(
            SeqOp::SeqLastIndex,
            sig1("seq.last_indexof", vec![seq(), seq()], int.clone()),
        );
        add(SeqOp::SeqToRe, sig1("seq.to_re", vec![seq()], re()));
        add(
            SeqOp::SeqInRe,
            sig1("seq.in_re", vec![seq(), re()], boolean.clone()),
        );
        add(
            SeqOp::SeqReplaceRe,
            sig1("str.replace_re", vec![seq(), re(), seq()], seq()),
        );
        add(
            SeqOp::SeqReplaceReAll,
            sig1("str.replace_re_all", vec![seq(), re(), seq()], seq()),
        );
        add(
            SeqOp::SeqReplaceAll,
            sig1("str.replace_all", vec![seq(), seq(), seq()], seq()),
        );

        for (op, name) in [
            (SeqOp::RePlus, "re.+"),
            (SeqOp::ReStar, "re.*"),
            (SeqOp::ReOption, "re.opt"),
            (SeqOp::ReComplement, "re.comp"),
            (SeqOp::ReReverse, "re.reverse"),
        ] {
            add(op, sig1(name, vec![re()], re()));
        }
        add(SeqOp::ReRange, sig1("re.range", vec![seq(), seq()], re()));
        add(SeqOp::ReConcat, sig1("re.++", vec![re()], re()));
        add(SeqOp::ReUnion, sig1("re.union", vec![re()], re()));
        add(SeqOp::ReIntersect, sig1("re.inter", vec![re()], re()));
        add(SeqOp::ReDiff, sig1("re.diff", vec![re(), re()], re()));
        // Loop bounds live in declaration parameters; the two extra forms
        // take symbolic bounds as term arguments.
        add(SeqOp::ReLoop, sig1("re.loop", vec![re()], re()));
        add(SeqOp::ReLoop, sig1("re.loop", vec![re(), int.clone()], re()));
        add(
            SeqOp::ReLoop,
            sig1("re.loop", vec![re(), int.clone(), int.clone()], re()),
        );
        add(SeqOp::RePower, sig1("re.^", vec![re()], re()));
        add(SeqOp::ReEmptySet, sig1("re.none", vec![], re()));
        add(SeqOp::ReFullSeqSet, sig1("re.all", vec![], re()));
        add(SeqOp::ReFullCharSet, sig1("re.allchar", vec![], re()));
        add(SeqOp::ReOfPred, sig1("re.of.pred", vec![elem()], re()));
        add(
            SeqOp::ReDerivative,
            sig1("re.derivative", vec![elem(), re()], re()),
        );
        add(
            SeqOp::ReIsNullable,
            sig1("re.is_nullable", vec![re()], boolean.clone()),
        );
        add(
            SeqOp::ReAntimorovUnion,
            sig1("re.antimorov_union", vec![re()], re()),
        );

        add(
            SeqOp::StringItos,
            sig0("str.from_int", vec![int.clone()], string.clone()),
        );
        add(
            SeqOp::StringStoi,
            sig0("str.to_int", vec![string.clone()], int.clone()),
        );
        add(
            SeqOp::StringLt,
            sig0("str.<", vec![string.clone(), string.clone()], boolean.clone()),
        );
        add(
            SeqOp::StringLe,
            sig0("str.<=", vec![string.clone(), string.clone()], boolean.clone()),
        );
        add(
            SeqOp::StringIsDigit,
            sig0("str.is_digit", vec![string.clone()], boolean.clone()),
        );
        add(
            SeqOp::StringToCode,
            sig0("str.to_code", vec![string.clone()], int.clone()),
        );
        add(
            SeqOp::StringFromCode,
            sig0("str.from_code", vec![int.clone()], string.clone()),
        );
        add(SeqOp::CharLe, sig0("char.<=", vec![ch.clone(), ch], boolean));
    }

    /// Associativity policy for the flattenable operators; `None` for
    /// fixed-arity operators.
    #[must_use]
    pub fn assoc_policy(op: SeqOp) -> Option<Assoc> {
        match op {
            SeqOp::SeqConcat
            | SeqOp::ReConcat
            | SeqOp::ReUnion
            | SeqOp::ReIntersect
            | SeqOp::ReAntimorovUnion => Some(Assoc::Right),
            _ => None,
        }
    }

    /// Validate and resolve a sort request.
    ///
    /// `Seq` requires exactly one element parameter; `Re` exactly one
    /// parameter that must itself be a sequence sort. `Char`, `String`, and
    /// `RegLan` take no parameters and resolve to the canonical objects.
    /// Anything else is a configuration error, never silently defaulted.
    pub fn mk_sort(
        &mut self,
        tm: &mut TermManager,
        kind: SortKind,
        params: &[SortId],
    ) -> Result<SortId> {
        let arity_err = |name: &str, expected: usize, found: usize| StrandError::Arity {
            op: name.to_string(),
            expected,
            found,
        };
        match kind {
            SortKind::Seq => {
                if params.len() != 1 {
                    return Err(arity_err("Seq", 1, params.len()));
                }
                self.has_seq = true;
                let sort = tm.sorts.intern(SortKind::Seq, params);
                debug!(sort = sort.0, "interned sequence sort");
                Ok(sort)
            }
            SortKind::Re => {
                if params.len() != 1 {
                    return Err(arity_err("RE", 1, params.len()));
                }
                if !tm.sorts.is_seq_like(params[0]) {
                    return Err(StrandError::SortMismatch {
                        expected: "a sequence sort".to_string(),
                        found: format!("{:?}", tm.sorts.kind(params[0])),
                    });
                }
                self.has_re = true;
                let sort = tm.sorts.intern(SortKind::Re, params);
                debug!(sort = sort.0, "interned regex sort");
                Ok(sort)
            }
            SortKind::Char => {
                if !params.is_empty() {
                    return Err(arity_err("Char", 0, params.len()));
                }
                Ok(self.char_sort)
            }
            SortKind::String => {
                if !params.is_empty() {
                    return Err(arity_err("String", 0, params.len()));
                }
                self.has_seq = true;
                Ok(self.string_sort)
            }
            SortKind::RegLan => {
                if !params.is_empty() {
                    return Err(arity_err("RegLan", 0, params.len()));
                }
                self.has_re = true;
                Ok(self.reglan_sort)
            }
            other => Err(StrandError::UnknownSort(format!("{other:?}"))),
        }
    }

    /// Resolve an operator request to a (deduplicated) declaration.
    ///
    /// Literal-producing kinds construct nullary declarations carrying the
    /// value; every other kind goes through the signature matcher, trying
    /// candidate signatures in registration order. The declaration name is
    /// string-specialized when the matched element sort is `Char`.
    pub fn mk_func_decl(
        &mut self,
        tm: &mut TermManager,
        op: SeqOp,
        params: &[DeclParam],
        domain: &[SortId],
        range: Option<SortId>,
    ) -> Result<DeclId> {
        match op {
            SeqOp::StringConst => self.mk_string_decl(tm, params),
            SeqOp::CharConst => self.mk_char_decl(tm, params),
            SeqOp::SeqSkolem => Err(StrandError::UnknownOperator(
                "skolem declarations are built through mk_skolem_decl".to_string(),
            )),
            _ => self.mk_matched_decl(tm, op, params, domain, range),
        }
    }

    fn mk_matched_decl(
        &mut self,
        tm: &mut TermManager,
        op: SeqOp,
        params: &[DeclParam],
        domain: &[SortId],
        range: Option<SortId>,
    ) -> Result<DeclId> {
        let sigs = self
            .sigs
            .get(&op.code())
            .ok_or_else(|| StrandError::UnknownOperator(op.seq_name().to_string()))?;

        let assoc = Self::assoc_policy(op);
        let mut arity_seen = None;
        let mut matched = None;
        for sig in sigs {
            let outcome = if assoc.is_some() {
                match_assoc(&mut tm.sorts, sig, domain, range)
            } else {
                if sig.domain.len() != domain.len() {
                    arity_seen = Some(sig.domain.len());
                    continue;
                }
                match_signature(&mut tm.sorts, sig, domain, range)
            };
            if let Some((binding, range_sort)) = outcome {
                matched = Some((binding, range_sort));
                break;
            }
        }

        let (binding, range_sort) = match matched {
            Some(hit) => hit,
            None => {
                // Distinguish pure arity errors from sort mismatches.
                if let Some(expected) = arity_seen {
                    return Err(StrandError::Arity {
                        op: op.seq_name().to_string(),
                        expected,
                        found: domain.len(),
                    });
                }
                return Err(StrandError::NoMatch {
                    op: op.seq_name().to_string(),
                });
            }
        };

        self.note_usage(op);
        let string_specialized =
            binding.first().copied().flatten() == Some(self.char_sort);
        let display_name = if string_specialized {
            op.str_name().unwrap_or_else(|| op.seq_name())
        } else {
            op.seq_name()
        };
        let name = tm.intern_name(display_name);
        trace!(op = display_name, "resolved declaration");
        Ok(tm.mk_decl(FuncDecl {
            name,
            code: op.code(),
            params: params.iter().cloned().collect(),
            domain: SmallVec::from_slice(domain),
            range: range_sort,
        }))
    }

    fn note_usage(&mut self, op: SeqOp) {
        match op {
            SeqOp::SeqToRe
            | SeqOp::SeqInRe
            | SeqOp::RePlus
            | SeqOp::ReStar
            | SeqOp::ReOption
            | SeqOp::ReRange
            | SeqOp::ReConcat
            | SeqOp::ReUnion
            | SeqOp::ReDiff
            | SeqOp::ReIntersect
            | SeqOp::ReLoop
            | SeqOp::RePower
            | SeqOp::ReComplement
            | SeqOp::ReEmptySet
            | SeqOp::ReFullSeqSet
            | SeqOp::ReFullCharSet
            | SeqOp::ReOfPred
            | SeqOp::ReReverse
            | SeqOp::ReDerivative
            | SeqOp::ReIsNullable
            | SeqOp::ReAntimorovUnion => self.has_re = true,
            _ => self.has_seq = true,
        }
    }

    fn mk_string_decl(&mut self, tm: &mut TermManager, params: &[DeclParam]) -> Result<DeclId> {
        let buf = match params {
            [DeclParam::Zstr(buf)] => buf.clone(),
            _ => {
                return Err(StrandError::MalformedLiteral(
                    "string constant expects one code-point buffer parameter".to_string(),
                ))
            }
        };
        if let Some(&bad) = buf.iter().find(|&&p| p > MAX_CHAR) {
            return Err(StrandError::MalformedLiteral(format!(
                "code point {bad} exceeds maximum {MAX_CHAR}"
            )));
        }
        self.has_seq = true;
        let name = tm.intern_name("str.const");
        Ok(tm.mk_decl(FuncDecl {
            name,
            code: SeqOp::StringConst.code(),
            params: SmallVec::from_buf([DeclParam::Zstr(buf)]),
            domain: SmallVec::new(),
            range: self.string_sort,
        }))
    }

    fn mk_char_decl(&mut self, tm: &mut TermManager, params: &[DeclParam]) -> Result<DeclId> {
        let code = match params {
            [DeclParam::Int(code)] => *code,
            _ => {
                return Err(StrandError::MalformedLiteral(
                    "character constant expects one code parameter".to_string(),
                ))
            }
        };
        if code > u64::from(MAX_CHAR) {
            return Err(StrandError::MalformedLiteral(format!(
                "code point {code} exceeds maximum {MAX_CHAR}"
            )));
        }
        let name = tm.intern_name("char.const");
        Ok(tm.mk_decl(FuncDecl {
            name,
            code: SeqOp::CharConst.code(),
            params: SmallVec::from_buf([DeclParam::Int(code)]),
            domain: SmallVec::new(),
            range: self.char_sort,
        }))
    }

    /// Declaration for an internal witness function over the given signature.
    pub fn mk_skolem_decl(
        &mut self,
        tm: &mut TermManager,
        name: &str,
        domain: &[SortId],
        range: SortId,
    ) -> DeclId {
        let name = tm.intern_name(name);
        tm.mk_decl(FuncDecl {
            name,
            code: SeqOp::SeqSkolem.code(),
            params: SmallVec::new(),
            domain: SmallVec::from_slice(domain),
            range,
        })
    }

    /// Canonical string constant.
    pub fn mk_string(&mut self, tm: &mut TermManager, value: &ZString) -> TermId {
        let params = [DeclParam::Zstr(value.code_points().into())];
        let decl = self
            .mk_string_decl(tm, &params)
            .expect("validated code points");
        tm.mk_app(decl, &[]).expect("nullary application")
    }

    /// Canonical character constant.
    pub fn mk_char(&mut self, tm: &mut TermManager, code: u32) -> Result<TermId> {
        let decl = self.mk_char_decl(tm, &[DeclParam::Int(u64::from(code))])?;
        tm.mk_app(decl, &[])
    }

    /// Operator kind of a term, when it is an application of this theory.
    #[must_use]
    pub fn op_of(tm: &TermManager, term: TermId) -> Option<SeqOp> {
        let decl = tm.app_decl(term)?;
        SeqOp::from_code(tm.get_decl(decl)?.code)
    }

    /// Decoded value of a constant term: string/char constants, the empty
    /// sequence, units of character constants, and concatenations of those.
    #[must_use]
    pub fn const_value(tm: &TermManager, term: TermId) -> Option<ZString> {
        let mut out: Vec<u32> = Vec::new();
        let mut stack = vec![term];
        while let Some(t) = stack.pop() {
            match Self::op_of(tm, t)? {
                SeqOp::StringConst => {
                    let decl = tm.get_decl(tm.app_decl(t)?)?;
                    match decl.params.first()? {
                        DeclParam::Zstr(buf) => out.extend(buf.iter().copied()),
                        _ => return None,
                    }
                }
                SeqOp::SeqEmpty => {}
                SeqOp::SeqUnit => {
                    let arg = *tm.app_args(t).first()?;
                    let code = Self::const_char(tm, arg)?;
                    out.push(code);
                }
                SeqOp::SeqConcat => {
                    // Reverse push keeps term order under the stack pop.
                    for &arg in tm.app_args(t).iter().rev() {
                        stack.push(arg);
                    }
                }
                _ => return None,
            }
        }
        ZString::from_code_points(&out).ok()
    }

    /// Code point of a character constant.
    #[must_use]
    pub fn const_char(tm: &TermManager, term: TermId) -> Option<u32> {
        if Self::op_of(tm, term)? != SeqOp::CharConst {
            return None;
        }
        let decl = tm.get_decl(tm.app_decl(term)?)?;
        match decl.params.first()? {
            DeclParam::Int(code) => u32::try_from(*code).ok(),
            _ => None,
        }
    }

    /// Whether `term` is a value for model-construction purposes.
    #[must_use]
    pub fn is_value(tm: &TermManager, term: TermId) -> bool {
        match Self::op_of(tm, term) {
            Some(SeqOp::CharConst) => true,
            Some(
                SeqOp::StringConst | SeqOp::SeqEmpty | SeqOp::SeqUnit | SeqOp::SeqConcat,
            ) => Self::const_value(tm, term).is_some(),
            _ => false,
        }
    }

    /// Equality of two constant applications, decided by value comparison,
    /// never by identity.
    #[must_use]
    pub fn are_equal(tm: &TermManager, a: TermId, b: TermId) -> bool {
        if let (Some(ca), Some(cb)) = (Self::const_char(tm, a), Self::const_char(tm, b)) {
            return ca == cb;
        }
        match (Self::const_value(tm, a), Self::const_value(tm, b)) {
            (Some(va), Some(vb)) => va == vb,
            _ => false,
        }
    }

    /// Disequality of two constant applications, decided by value
    /// comparison. `false` when either side is not a value.
    #[must_use]
    pub fn are_distinct(tm: &TermManager, a: TermId, b: TermId) -> bool {
        if let (Some(ca), Some(cb)) = (Self::const_char(tm, a), Self::const_char(tm, b)) {
            return ca != cb;
        }
        match (Self::const_value(tm, a), Self::const_value(tm, b)) {
            (Some(va), Some(vb)) => va != vb,
            _ => false,
        }
    }

    /// A witness value of the given sort, for model completion.
    pub fn get_some_value(&mut self, tm: &mut TermManager, sort: SortId) -> Result<TermId> {
        if sort == self.char_sort {
            return self.mk_char(tm, 0x61);
        }
        if sort == self.string_sort {
            return Ok(self.mk_string(tm, &ZString::new()));
        }
        if tm.sorts.is_seq_like(sort) {
            let decl = self.mk_func_decl(tm, SeqOp::SeqEmpty, &[], &[], Some(sort))?;
            return tm.mk_app(decl, &[]);
        }
        if tm.sorts.is_re_like(sort) {
            let decl = self.mk_func_decl(tm, SeqOp::ReEmptySet, &[], &[], Some(sort))?;
            return tm.mk_app(decl, &[]);
        }
        Err(StrandError::UnknownSort(format!(
            "{:?}",
            tm.sorts.kind(sort)
        )))
    }

    /// Whether applications of `op` are treated as uninterpreted by the
    /// decision procedures.
    #[must_use]
    pub fn is_considered_uninterpreted(op: SeqOp) -> bool {
        matches!(op, SeqOp::SeqSkolem | SeqOp::SeqNthU)
    }

    /// Externally visible operator names for a logic. Internal-only kinds
    /// are never exported, for any logic.
    #[must_use]
    pub fn op_names(logic: &str) -> Vec<(&'static str, SeqOp)> {
        let mut names: Vec<(&'static str, SeqOp)> = vec![
            ("str.++", SeqOp::SeqConcat),
            ("str.len", SeqOp::SeqLength),
            ("str.at", SeqOp::SeqAt),
            ("str.substr", SeqOp::SeqExtract),
            ("str.prefixof", SeqOp::SeqPrefix),
            ("str.suffixof", SeqOp::SeqSuffix),
            ("str.contains", SeqOp::SeqContains),
            ("str.indexof", SeqOp::SeqIndex),
            ("str.replace", SeqOp::SeqReplace),
            ("str.replace_all", SeqOp::SeqReplaceAll),
            ("str.replace_re", SeqOp::SeqReplaceRe),
            ("str.replace_re_all", SeqOp::SeqReplaceReAll),
            ("str.last_indexof", SeqOp::SeqLastIndex),
            ("str.to_re", SeqOp::SeqToRe),
            ("str.in_re", SeqOp::SeqInRe),
            ("str.to_int", SeqOp::StringStoi),
            ("str.from_int", SeqOp::StringItos),
            ("str.<", SeqOp::StringLt),
            ("str.<=", SeqOp::StringLe),
            ("str.is_digit", SeqOp::StringIsDigit),
            ("str.to_code", SeqOp::StringToCode),
            ("str.from_code", SeqOp::StringFromCode),
            ("char.<=", SeqOp::CharLe),
            ("re.none", SeqOp::ReEmptySet),
            ("re.all", SeqOp::ReFullSeqSet),
            ("re.allchar", SeqOp::ReFullCharSet),
            ("re.++", SeqOp::ReConcat),
            ("re.union", SeqOp::ReUnion),
            ("re.inter", SeqOp::ReIntersect),
            ("re.diff", SeqOp::ReDiff),
            ("re.*", SeqOp::ReStar),
            ("re.+", SeqOp::RePlus),
            ("re.opt", SeqOp::ReOption),
            ("re.comp", SeqOp::ReComplement),
            ("re.range", SeqOp::ReRange),
            ("re.loop", SeqOp::ReLoop),
            ("re.^", SeqOp::RePower),
        ];
        if matches!(logic, "" | "ALL") {
            names.extend([
                ("seq.unit", SeqOp::SeqUnit),
                ("seq.empty", SeqOp::SeqEmpty),
                ("seq.++", SeqOp::SeqConcat),
                ("seq.len", SeqOp::SeqLength),
                ("seq.at", SeqOp::SeqAt),
                ("seq.nth", SeqOp::SeqNth),
                ("seq.extract", SeqOp::SeqExtract),
                ("seq.indexof", SeqOp::SeqIndex),
                ("seq.last_indexof", SeqOp::SeqLastIndex),
                ("seq.contains", SeqOp::SeqContains),
                ("seq.prefixof", SeqOp::SeqPrefix),
                ("seq.suffixof", SeqOp::SeqSuffix),
                ("seq.replace", SeqOp::SeqReplace),
                ("re.reverse", SeqOp::ReReverse),
            ]);
        }
        debug_assert!(names.iter().all(|(_, op)| !op.is_internal()));
        names
    }

    /// Externally visible sort names for a logic.
    #[must_use]
    pub fn sort_names(logic: &str) -> Vec<(&'static str, SortKind)> {
        let mut names = vec![("String", SortKind::String), ("RegLan", SortKind::RegLan)];
        if matches!(logic, "" | "ALL") {
            names.push(("Seq", SortKind::Seq));
            names.push(("RE", SortKind::Re));
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (TermManager, SeqPlugin) {
        let mut tm = TermManager::new();
        let plugin = SeqPlugin::new(&mut tm);
        (tm, plugin)
    }

    #[test]
    fn test_special_sorts_are_canonical() {
        let (mut tm, mut plugin) = setup();
        let s1 = plugin
            .mk_sort(&mut tm, SortKind::String, &[])
            .expect("string sort");
        let ch = plugin.mk_sort(&mut tm, SortKind::Char, &[]).expect("char");
        let s2 = plugin
            .mk_sort(&mut tm, SortKind::Seq, &[ch])
            .expect("seq of char");
        assert_eq!(s1, s2, "String must be the Seq(Char) object");

        let r1 = plugin
            .mk_sort(&mut tm, SortKind::RegLan, &[])
            .expect("reglan");
        let r2 = plugin.mk_sort(&mut tm, SortKind::Re, &[s1]).expect("re");
        assert_eq!(r1, r2);
    }

    #[test]
    fn test_re_over_non_sequence_rejected() {
        let (mut tm, mut plugin) = setup();
        let int = tm.sorts.int_sort;
        let err = plugin.mk_sort(&mut tm, SortKind::Re, &[int]).unwrap_err();
        assert!(matches!(err, StrandError::SortMismatch { .. }));
    }

    #[test]
    fn test_sort_arity_errors() {
        let (mut tm, mut plugin) = setup();
        let int = tm.sorts.int_sort;
        assert!(matches!(
            plugin.mk_sort(&mut tm, SortKind::Seq, &[]).unwrap_err(),
            StrandError::Arity { .. }
        ));
        assert!(matches!(
            plugin
                .mk_sort(&mut tm, SortKind::Char, &[int])
                .unwrap_err(),
            StrandError::Arity { .. }
        ));
        assert!(matches!(
            plugin.mk_sort(&mut tm, SortKind::Bool, &[]).unwrap_err(),
            StrandError::UnknownSort(_)
        ));
    }

    #[test]
    fn test_decl_name_string_specialization() {
        let (mut tm, mut plugin) = setup();
        let string = plugin.string_sort();
        let decl = plugin
            .mk_func_decl(&mut tm, SeqOp::SeqConcat, &[], &[string, string], None)
            .expect("concat over strings");
        let name = tm.resolve_name(tm.get_decl(decl).expect("decl").name);
        assert_eq!(name, "str.++");

        let int = tm.sorts.int_sort;
        let seq_int = plugin.mk_sort(&mut tm, SortKind::Seq, &[int]).expect("sort");
        let decl = plugin
            .mk_func_decl(&mut tm, SeqOp::SeqConcat, &[], &[seq_int, seq_int], None)
            .expect("concat over int sequences");
        let name = tm.resolve_name(tm.get_decl(decl).expect("decl").name);
        assert_eq!(name, "seq.++");
    }

    #[test]
    fn test_decl_dedup_and_no_match() {
        let (mut tm, mut plugin) = setup();
        let string = plugin.string_sort();
        let d1 = plugin
            .mk_func_decl(&mut tm, SeqOp::SeqLength, &[], &[string], None)
            .expect("len");
        let d2 = plugin
            .mk_func_decl(&mut tm, SeqOp::SeqLength, &[], &[string], None)
            .expect("len again");
        assert_eq!(d1, d2);

        let int = tm.sorts.int_sort;
        let err = plugin
            .mk_func_decl(&mut tm, SeqOp::SeqLength, &[], &[int], None)
            .unwrap_err();
        assert!(matches!(err, StrandError::NoMatch { .. }));

        let err = plugin
            .mk_func_decl(&mut tm, SeqOp::SeqExtract, &[], &[string], None)
            .unwrap_err();
        assert!(matches!(err, StrandError::Arity { .. }));
    }

    #[test]
    fn test_constants_compare_by_value() {
        let (mut tm, mut plugin) = setup();
        let a1 = ZString::parse("ab").expect("literal");
        let s1 = plugin.mk_string(&mut tm, &a1);
        let s2 = plugin.mk_string(&mut tm, &ZString::parse("ab").expect("literal"));
        let s3 = plugin.mk_string(&mut tm, &ZString::parse("cd").expect("literal"));
        assert!(SeqPlugin::are_equal(&tm, s1, s2));
        assert!(SeqPlugin::are_distinct(&tm, s1, s3));
        assert!(!SeqPlugin::are_distinct(&tm, s1, s2));
        assert!(SeqPlugin::is_value(&tm, s1));

        let c1 = plugin.mk_char(&mut tm, 0x61).expect("char");
        let c2 = plugin.mk_char(&mut tm, 0x61).expect("char");
        let c3 = plugin.mk_char(&mut tm, 0x62).expect("char");
        assert!(SeqPlugin::are_equal(&tm, c1, c2));
        assert!(SeqPlugin::are_distinct(&tm, c1, c3));
    }

    #[test]
    fn test_char_constant_range_checked() {
        let (mut tm, mut plugin) = setup();
        assert!(plugin.mk_char(&mut tm, MAX_CHAR).is_ok());
        assert!(plugin.mk_char(&mut tm, MAX_CHAR + 1).is_err());
    }

    #[test]
    fn test_builtin_tables_exclude_internal_ops() {
        for &logic in SUPPORTED_LOGICS {
            for (name, op) in SeqPlugin::op_names(logic) {
                assert!(
                    !op.is_internal(),
                    "{name} exports internal op {op:?} for logic {logic:?}"
                );
            }
            assert!(!SeqPlugin::sort_names(logic).is_empty());
        }
    }

    #[test]
    fn test_empty_seq_needs_range_hint() {
        let (mut tm, mut plugin) = setup();
        let err = plugin
            .mk_func_decl(&mut tm, SeqOp::SeqEmpty, &[], &[], None)
            .unwrap_err();
        assert!(matches!(err, StrandError::NoMatch { .. }));

        let string = plugin.string_sort();
        let decl = plugin
            .mk_func_decl(&mut tm, SeqOp::SeqEmpty, &[], &[], Some(string))
            .expect("empty with hint");
        assert_eq!(tm.get_decl(decl).expect("decl").range, string);
    }
}
