//! Checker integration tests.
//!
//! Builds types through the public table API, infers literal values, and
//! verifies assignability verdicts and their explanations.

use tycompat_checker::{infer, is_assignable, BindingKind, Checker, CheckerOptions, Expr};
use tycompat_types::{EnumMemberInit, TypeId, TypeTable};

/// Helper: a table with a spread of well-formed types covering every variant.
fn sample_types(table: &mut TypeTable) -> Vec<TypeId> {
    let (s, n, b) = (table.string_type, table.number_type, table.boolean_type);
    let five = table.number_literal(5.0);
    let a = table.string_literal("a");
    let sn = table.union([s, n]);
    let lits = table.union([five, a]);
    let strings = table.array_of(s);
    let mixed = table.array_of(sn);
    let pair = table.tuple_of(vec![s, n]).unwrap();
    let single = table.tuple_of(vec![b]).unwrap();
    let person = table.object_shape([("name", s), ("age", n)]).unwrap();
    let named = table.object_shape([("name", s)]).unwrap();
    let empty = table.object_shape(Vec::<(&str, TypeId)>::new()).unwrap();
    let unary = table.function_sig(vec![n], n);
    let nullary = table.function_sig(vec![], n);
    let loose = table.function_sig(vec![table.any_type], n);
    vec![
        table.any_type,
        table.unknown_type,
        s,
        n,
        b,
        table.void_type,
        table.undefined_type,
        table.never_type,
        table.object_type,
        table.true_type,
        five,
        a,
        sn,
        lits,
        strings,
        mixed,
        pair,
        single,
        person,
        named,
        empty,
        unary,
        nullary,
        loose,
    ]
}

// ============================================================================
// Algebraic properties
// ============================================================================

#[test]
fn test_reflexivity() {
    let mut table = TypeTable::new();
    let all = sample_types(&mut table);
    let mut checker = Checker::new(&table);
    for &t in &all {
        assert!(checker.is_assignable(t, t), "{} not assignable to itself", table.type_to_string(t));
    }
}

#[test]
fn test_any_absorption() {
    let mut table = TypeTable::new();
    let all = sample_types(&mut table);
    let any = table.any_type;
    let mut checker = Checker::new(&table);
    for &t in &all {
        assert!(checker.is_assignable(t, any), "{} -> any", table.type_to_string(t));
        assert!(checker.is_assignable(any, t), "any -> {}", table.type_to_string(t));
    }
}

#[test]
fn test_never_is_bottom() {
    let mut table = TypeTable::new();
    let all = sample_types(&mut table);
    let (never, any) = (table.never_type, table.any_type);
    let mut checker = Checker::new(&table);
    for &t in &all {
        assert!(checker.is_assignable(never, t), "never -> {}", table.type_to_string(t));
        if t != never && t != any {
            assert!(!checker.is_assignable(t, never), "{} -> never", table.type_to_string(t));
        }
    }
}

#[test]
fn test_unknown_is_top_but_only_flows_into_top() {
    let mut table = TypeTable::new();
    let all = sample_types(&mut table);
    let (unknown, any) = (table.unknown_type, table.any_type);
    let mut checker = Checker::new(&table);
    for &t in &all {
        assert!(checker.is_assignable(t, unknown), "{} -> unknown", table.type_to_string(t));
        let expected = t == unknown || t == any;
        assert_eq!(checker.is_assignable(unknown, t), expected, "unknown -> {}", table.type_to_string(t));
    }
}

#[test]
fn test_unknown_asymmetry() {
    let table = TypeTable::new();
    assert!(!is_assignable(&table, table.unknown_type, table.string_type));
    assert!(is_assignable(&table, table.string_type, table.unknown_type));
}

// ============================================================================
// Unions and literals
// ============================================================================

#[test]
fn test_union_distribution() {
    let mut table = TypeTable::new();
    let five = table.number_literal(5.0);
    let sn = table.union([table.number_type, table.string_type]);
    assert!(is_assignable(&table, five, sn));
    assert!(!is_assignable(&table, sn, table.number_type));
}

#[test]
fn test_union_subset_is_assignable() {
    let mut table = TypeTable::new();
    let (s, n, b) = (table.string_type, table.number_type, table.boolean_type);
    let sn = table.union([s, n]);
    let snb = table.union([s, n, b]);
    assert!(is_assignable(&table, sn, snb));
    assert!(!is_assignable(&table, snb, sn));
}

#[test]
fn test_literal_union_into_primitive() {
    let mut table = TypeTable::new();
    let a = table.string_literal("a");
    let b = table.string_literal("b");
    let ab = table.union([a, b]);
    let c = table.string_literal("c");
    assert!(is_assignable(&table, ab, table.string_type));
    assert!(is_assignable(&table, a, ab));
    assert!(!is_assignable(&table, c, ab));
    assert!(!is_assignable(&table, table.string_type, ab));
}

#[test]
fn test_true_false_union_is_boolean() {
    let mut table = TypeTable::new();
    let tf = table.union([table.true_type, table.false_type]);
    assert!(is_assignable(&table, table.boolean_type, tf));
}

// ============================================================================
// Arrays and tuples
// ============================================================================

#[test]
fn test_tuple_arity_is_strict() {
    let mut table = TypeTable::new();
    let (s, n) = (table.string_type, table.number_type);
    let short = table.tuple_of(vec![s, n]).unwrap();
    let long = table.tuple_of(vec![s, n, n]).unwrap();
    assert!(!is_assignable(&table, short, long));
    assert!(!is_assignable(&table, long, short));
}

#[test]
fn test_tuple_elements_compare_by_position() {
    let mut table = TypeTable::new();
    let (s, n) = (table.string_type, table.number_type);
    let sn = table.tuple_of(vec![s, n]).unwrap();
    let ns = table.tuple_of(vec![n, s]).unwrap();
    let five = table.number_literal(5.0);
    let s5 = table.tuple_of(vec![s, five]).unwrap();
    assert!(!is_assignable(&table, sn, ns));
    assert!(is_assignable(&table, s5, sn));
    assert!(!is_assignable(&table, sn, s5));
}

#[test]
fn test_tuple_widens_to_array() {
    let mut table = TypeTable::new();
    let (s, n) = (table.string_type, table.number_type);
    let pair = table.tuple_of(vec![s, n]).unwrap();
    let sn = table.union([s, n]);
    let mixed = table.array_of(sn);
    let strings = table.array_of(s);
    assert!(is_assignable(&table, pair, mixed));
    assert!(!is_assignable(&table, pair, strings));
    // Arrays have no fixed length to offer a tuple
    assert!(!is_assignable(&table, mixed, pair));
}

#[test]
fn test_array_covariance_scenario() {
    let mut table = TypeTable::new();
    let arr_str = infer(
        &mut table,
        &Expr::Array(vec![Expr::string("a"), Expr::string("b")]),
        BindingKind::Let,
    )
    .unwrap();
    let strings = table.array_of(table.string_type);
    assert_eq!(arr_str, strings);

    let sn = table.union([table.string_type, table.number_type]);
    let mixed = table.array_of(sn);
    assert!(is_assignable(&table, strings, mixed));
    assert!(!is_assignable(&table, mixed, strings));
}

#[test]
fn test_any_array_accepted_by_typed_array() {
    let mut table = TypeTable::new();
    let some_array = table.any_type;
    let strings = table.array_of(table.string_type);
    let any_array = table.array_of(table.any_type);
    assert!(is_assignable(&table, some_array, strings));
    assert!(is_assignable(&table, any_array, strings));
}

// ============================================================================
// Objects
// ============================================================================

#[test]
fn test_object_width_subtyping() {
    let mut table = TypeTable::new();
    let (s, n) = (table.string_type, table.number_type);
    let person = table.object_shape([("name", s), ("age", n)]).unwrap();
    let named = table.object_shape([("name", s)]).unwrap();
    assert!(is_assignable(&table, person, named));
    assert!(!is_assignable(&table, named, person));
}

#[test]
fn test_object_property_types_must_match() {
    let mut table = TypeTable::new();
    let (s, n) = (table.string_type, table.number_type);
    let person = table.object_shape([("name", s), ("age", n)]).unwrap();
    let numbered = table.object_shape([("name", n), ("age", n)]).unwrap();
    assert!(!is_assignable(&table, numbered, person));
}

#[test]
fn test_nested_object_scenario() {
    // `mark` is inferred; `mark2` is declared with a wider array property
    let mut table = TypeTable::new();
    let mark = infer(
        &mut table,
        &Expr::object([
            ("name", Expr::string("Marcus")),
            ("favoriteValues", Expr::Array(vec![Expr::string("a"), Expr::string("b")])),
        ]),
        BindingKind::Let,
    )
    .unwrap();
    let sn = table.union([table.string_type, table.number_type]);
    let mixed = table.array_of(sn);
    let mark2 = table
        .object_shape([("name", table.string_type), ("favoriteValues", mixed)])
        .unwrap();
    let strings = table.array_of(table.string_type);

    let mut checker = Checker::new(&table);
    assert!(checker.is_assignable(mark, mark2));
    assert!(!checker.is_assignable(mark2, mark));
    let favorite = table.property(mark, "favoriteValues").unwrap();
    assert!(checker.is_assignable(favorite, strings));
    let favorite2 = table.property(mark2, "favoriteValues").unwrap();
    assert!(!checker.is_assignable(favorite2, strings));
}

#[test]
fn test_object_keyword() {
    let mut table = TypeTable::new();
    let object = table.object_type;
    let empty = table.object_shape(Vec::<(&str, TypeId)>::new()).unwrap();
    let named = table.object_shape([("name", table.string_type)]).unwrap();
    let numbers = table.array_of(table.number_type);
    let thunk = table.function_sig(vec![], table.number_type);
    let three = table.number_literal(3.0);
    let a = table.string_literal("a");

    let mut checker = Checker::new(&table);
    assert!(checker.is_assignable(empty, object));
    assert!(checker.is_assignable(named, object));
    // Arrays are objects; tsc accepts `let obj: object = [1, 2]`
    assert!(checker.is_assignable(numbers, object));
    assert!(checker.is_assignable(thunk, object));
    assert!(!checker.is_assignable(three, object));
    assert!(!checker.is_assignable(a, object));
    assert!(!checker.is_assignable(table.undefined_type, object));
    // `object` has no known properties
    assert!(!checker.is_assignable(object, named));
}

// ============================================================================
// Functions
// ============================================================================

#[test]
fn test_function_parameter_contravariance() {
    let mut table = TypeTable::new();
    let n = table.number_type;
    let loose = table.function_sig(vec![table.any_type], n);
    let wrong = table.function_sig(vec![table.string_type], n);
    let unary = table.function_sig(vec![n], n);
    assert!(is_assignable(&table, loose, unary));
    assert!(!is_assignable(&table, wrong, unary));
}

#[test]
fn test_function_wider_parameter_is_assignable() {
    let mut table = TypeTable::new();
    let n = table.number_type;
    let sn = table.union([table.string_type, n]);
    let wide = table.function_sig(vec![sn], n);
    let narrow = table.function_sig(vec![n], n);
    assert!(is_assignable(&table, wide, narrow));
    assert!(!is_assignable(&table, narrow, wide));
}

#[test]
fn test_function_fewer_parameters_is_assignable() {
    // `type Unary = (a: number) => number; f = () => { return 0; }`
    let mut table = TypeTable::new();
    let n = table.number_type;
    let unary = table.function_sig(vec![n], n);
    let f = infer(&mut table, &Expr::arrow(vec![], Expr::Number(0.0)), BindingKind::Let).unwrap();
    assert!(is_assignable(&table, f, unary));
    assert!(!is_assignable(&table, unary, f));
}

#[test]
fn test_function_return_covariance() {
    let mut table = TypeTable::new();
    let n = table.number_type;
    let five = table.number_literal(5.0);
    let returns_five = table.function_sig(vec![n], five);
    let returns_number = table.function_sig(vec![n], n);
    let returns_string = table.function_sig(vec![n], table.string_type);
    assert!(is_assignable(&table, returns_five, returns_number));
    assert!(!is_assignable(&table, returns_number, returns_five));
    assert!(!is_assignable(&table, returns_string, returns_number));
}

// ============================================================================
// Void and undefined
// ============================================================================

#[test]
fn test_void_undefined() {
    let table = TypeTable::new();
    assert!(is_assignable(&table, table.undefined_type, table.void_type));
    assert!(!is_assignable(&table, table.void_type, table.undefined_type));
    assert!(is_assignable(&table, table.undefined_type, table.undefined_type));
}

// ============================================================================
// Enums
// ============================================================================

#[test]
fn test_enum_members_and_union() {
    let mut table = TypeTable::new();
    let color = table
        .declare_enum(
            "Color",
            [
                ("Red", EnumMemberInit::Auto),
                ("Green", EnumMemberInit::Auto),
                ("Blue", EnumMemberInit::Auto),
            ],
        )
        .unwrap();
    let red = color.member("Red").unwrap();
    let two = table.number_literal(2.0);
    let seven = table.number_literal(7.0);

    let mut checker = Checker::new(&table);
    assert!(checker.is_assignable(red, color.union()));
    assert!(checker.is_assignable(color.union(), table.number_type));
    assert!(checker.is_assignable(two, color.union()));
    assert!(!checker.is_assignable(seven, color.union()));
    assert!(!checker.is_assignable(table.number_type, color.union()));
    assert!(!checker.is_assignable(color.union(), red));
}

// ============================================================================
// Checker Options
// ============================================================================

#[test]
fn test_undefined_without_strict_null_checks() {
    let table = TypeTable::new();
    let options = CheckerOptions { strict_null_checks: false, ..CheckerOptions::default() };
    let mut lax = Checker::with_options(&table, options);
    assert!(lax.is_assignable(table.undefined_type, table.number_type));
    assert!(!lax.is_assignable(table.void_type, table.number_type));

    let mut strict = Checker::new(&table);
    assert!(!strict.is_assignable(table.undefined_type, table.number_type));
}

#[test]
fn test_bivariant_parameters_without_strict_function_types() {
    let mut table = TypeTable::new();
    let n = table.number_type;
    let sn = table.union([table.string_type, n]);
    let wide = table.function_sig(vec![sn], n);
    let narrow = table.function_sig(vec![n], n);
    let wrong = table.function_sig(vec![table.string_type], n);

    let options = CheckerOptions { strict_function_types: false, ..CheckerOptions::default() };
    let mut lax = Checker::with_options(&table, options);
    assert!(lax.is_assignable(narrow, wide));
    assert!(!lax.is_assignable(wrong, narrow));
}

// ============================================================================
// Explanations
// ============================================================================

#[test]
fn test_explain_missing_property() {
    let mut table = TypeTable::new();
    let (s, n) = (table.string_type, table.number_type);
    let person = table.object_shape([("name", s), ("age", n)]).unwrap();
    let named = table.object_shape([("name", s)]).unwrap();
    let mut checker = Checker::new(&table);
    let diag = checker.explain(named, person).unwrap();
    assert_eq!(
        diag.message_text,
        "Type '{ name: string }' is not assignable to type '{ age: number; name: string }'."
    );
    let detail = &diag.related_information[0];
    assert_eq!(detail.code, 2741);
    assert!(detail.message_text.starts_with("Property 'age' is missing"));
}

#[test]
fn test_explain_incompatible_property() {
    let mut table = TypeTable::new();
    let (s, n) = (table.string_type, table.number_type);
    let person = table.object_shape([("name", s)]).unwrap();
    let numbered = table.object_shape([("name", n)]).unwrap();
    let mut checker = Checker::new(&table);
    let diag = checker.explain(numbered, person).unwrap();
    let codes: Vec<u32> = diag.chain().map(|d| d.code).collect();
    assert_eq!(codes, vec![2322, 2326, 2322]);
    let innermost = diag.chain().last().unwrap();
    assert_eq!(innermost.message_text, "Type 'number' is not assignable to type 'string'.");
}

#[test]
fn test_explain_tuple_arity() {
    let mut table = TypeTable::new();
    let (s, n) = (table.string_type, table.number_type);
    let short = table.tuple_of(vec![s, n]).unwrap();
    let long = table.tuple_of(vec![s, n, n]).unwrap();
    let mut checker = Checker::new(&table);
    let too_few = checker.explain(short, long).unwrap();
    assert_eq!(too_few.related_information[0].message_text, "Source has 2 element(s) but target requires 3.");
    let too_many = checker.explain(long, short).unwrap();
    assert_eq!(too_many.related_information[0].code, 2619);
}

#[test]
fn test_explain_function_signatures() {
    let mut table = TypeTable::new();
    let (s, n) = (table.string_type, table.number_type);
    let unary = table.function_sig(vec![n], n);
    let binary = table.function_sig(vec![n, n], n);
    let wrong_param = table.function_sig(vec![s], n);
    let wrong_return = table.function_sig(vec![n], s);
    let mut checker = Checker::new(&table);

    let arity = checker.explain(binary, unary).unwrap();
    assert_eq!(
        arity.related_information[0].message_text,
        "Target signature provides too few arguments. Expected 2 or more, but got 1."
    );
    let param = checker.explain(wrong_param, unary).unwrap();
    assert_eq!(param.related_information[0].message_text, "Types of parameters at position 0 are incompatible.");
    let ret = checker.explain(wrong_return, unary).unwrap();
    assert_eq!(ret.related_information[0].code, 2202);
}

#[test]
fn test_check_assignment_records_diagnostics() {
    let mut table = TypeTable::new();
    let x = infer(&mut table, &Expr::Number(10.0), BindingKind::Let).unwrap();
    let mut checker = Checker::new(&table);
    assert!(checker.check_assignment(x, table.number_type).is_ok());
    // x = 'a'
    let err = checker.check_assignment(table.string_type, x).unwrap_err();
    assert_eq!(err.code, 2322);
    assert_eq!(checker.diagnostics().len(), 1);
    let taken = checker.take_diagnostics();
    assert_eq!(taken.len(), 1);
    assert!(checker.diagnostics().is_empty());
    assert_eq!(
        taken.into_diagnostics()[0].to_string(),
        "error TS2322: Type 'string' is not assignable to type 'number'."
    );
}
