use radixfloat::prelude::*;

#[test]
fn test_parse_hex() {
    let v = RealValue::from_str_radix("FF", 16);
    assert!(v.is_valid());
    assert_eq!(v.to_i64(), Some(255));
    assert_eq!(v, RealValue::from_i64(255, 10));
}

#[test]
fn test_factorial() {
    let mut v = RealValue::from_i64(5, 10);
    v.factorial();
    assert_eq!(v.to_i64(), Some(120));

    let mut frac = RealValue::from_str_radix("2.5", 10);
    frac.factorial();
    assert!(!frac.is_valid());
}

#[test]
fn test_bitnot_byte() {
    let mut v = RealValue::from_i64(0, 10);
    v.bitnot_with_complement(8);
    assert_eq!(v.to_i64(), Some(255));
}

#[test]
fn test_limited_string() {
    let v = RealValue::from_str_radix("1234.5", 10);
    let s = v.limited_string(6, 1, false, 0, &FormatRules::default());
    assert_eq!(s.mantissa, "1234.5");
    assert_eq!(s.exponent, "");
}

#[test]
fn test_complex_square_root() {
    let mut v = ComplexValue::from_i64(-4, 10);
    v.sqrt();
    assert!(v.is_valid());
    assert!(v.real_part().is_zero());
    assert_eq!(v.imaginary_part().to_i64(), Some(2));
}

#[test]
fn test_division_by_zero_is_sticky() {
    let mut v = RealValue::from_i64(7, 10);
    v.divide_by(&RealValue::zero(10));
    assert!(!v.is_valid());

    v.add(&RealValue::from_i64(1, 10));
    assert!(!v.is_valid());
    v.sqrt();
    assert!(!v.is_valid());
    v.sin_with_trig_mode(TrigMode::Degrees, false, false);
    assert!(!v.is_valid());
    assert_eq!(v.to_string(), "Error");

    let mut c = ComplexValue::from_i64(1, 10);
    c.divide_by(&ComplexValue::zero(10));
    c.multiply_by(&ComplexValue::i(10));
    assert!(!c.is_valid());
}

#[test]
fn test_self_aliasing() {
    let x = RealValue::from_str_radix("21.5", 10);
    assert_eq!(&x + &x, RealValue::from_i64(43, 10));

    let mut y = x.clone();
    y.add(&x.duplicate());
    assert_eq!(y, RealValue::from_i64(43, 10));

    let z = ComplexValue::i(10);
    let sum = &z + &z;
    assert_eq!(sum.imaginary_part().to_i64(), Some(2));
}

#[test]
fn test_operator_chain() {
    // (2 + 3) * 4 ^ 2 evaluated in binding order
    let ctx = EvalContext::default();
    let plus: Operator = "+".parse().unwrap();
    let times: Operator = "*".parse().unwrap();
    let power: Operator = "^".parse().unwrap();
    assert!(power.binds_before(&times));
    assert!(times.binds_before(&plus));

    let square = power
        .apply_binary(&ComplexValue::from_i64(4, 10), &ComplexValue::from_i64(2, 10), &ctx)
        .unwrap();
    let sum = plus
        .apply_binary(&ComplexValue::from_i64(2, 10), &ComplexValue::from_i64(3, 10), &ctx)
        .unwrap();
    let product = times.apply_binary(&sum, &square, &ctx).unwrap();
    assert_eq!(product.real_part().to_i64(), Some(80));
}

#[test]
fn test_precision_settings() {
    let p: Precision = "4".parse().unwrap();
    let v = RealValue::pi_with_precision(10, p);
    assert_eq!(v.precision(), p);
    assert_eq!(v.mantissa().len(), 4);
    assert!("1".parse::<Precision>().is_err());
}
