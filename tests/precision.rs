//! Precision propagation, assignment semantics, and string round trips.

use agm_float::{
    get_default_prec, set_default_base, set_default_prec, set_precision_mode, with_default_context, BigFloat,
    Context, FormatSpec, Integer, Notation, PrecisionMode, Radix, Rational, DEFAULT_P,
};
use rand::random;

#[test]
fn binary_precision() {
    let a = BigFloat::from_f64_prec(1.25, 64);
    let b = BigFloat::from_f64_prec(3.5, 128);

    assert_eq!((&a + &b).precision(), 128);
    assert_eq!((&b - &a).precision(), 128);
    assert_eq!((a.clone() * b.clone()).precision(), 128);
    assert_eq!((&a / 3).precision(), 64);
    assert_eq!((3.0f64 / &a).precision(), 64);
    assert_eq!(a.hypot(&b).precision(), 128);

    set_precision_mode(PrecisionMode::Ambient);
    set_default_prec(96);
    assert_eq!((&a + &b).precision(), 96);
    assert_eq!((&a * 2).precision(), 96);

    // unary operations keep the operand's precision
    assert_eq!(a.sqrt().precision(), 64);
    assert_eq!((-&b).precision(), 128);
    assert_eq!(b.log().precision(), 128);

    set_precision_mode(PrecisionMode::Propagate);
    set_default_prec(DEFAULT_P);
    assert_eq!((&a + &b).precision(), 128);
}

#[test]
fn default_capture() {
    set_default_prec(100);
    let a = BigFloat::from_f64(1.0);
    let z = BigFloat::new();
    set_default_prec(200);

    assert_eq!(a.precision(), 100);
    assert_eq!(z.precision(), 100);
    assert_eq!(BigFloat::from_u32(7).precision(), 200);

    let taken = std::mem::take(&mut BigFloat::from_f64_prec(2.0, 10));
    assert_eq!(taken.precision(), 10);

    let mut x = BigFloat::from_f64_prec(2.0, 10);
    let old = std::mem::take(&mut x);
    assert_eq!(old, 2);
    assert!(x.is_zero());
    assert_eq!(x.precision(), 200);

    set_default_prec(DEFAULT_P);
}

#[test]
fn copy_independence() {
    let a = BigFloat::from_f64_prec(1.5, 64);
    let mut b = a.clone();
    assert_eq!(b.precision(), 64);

    b += 1;
    b.set_precision(8);

    assert_eq!(a, 1.5);
    assert_eq!(a.precision(), 64);
    assert_eq!(b, 2.5);
    assert_eq!(b.precision(), 8);
}

#[test]
fn assignment() {
    let y = BigFloat::parse_radix("0.1", Radix::Dec, 200).unwrap();

    let mut x = BigFloat::with_precision(10);
    x.assign(&y);
    assert_eq!(x.precision(), 10);
    assert_eq!(x, BigFloat::with_value(&y, 10));
    assert_eq!(x.to_f64(), 819.0 / 8192.0);

    x.assign(y.clone());
    assert_eq!(x.precision(), 10);

    x.assign(1000001);
    assert_eq!(x, 1000448);

    x.assign_f64(0.5);
    assert_eq!(x, 0.5);

    x.assign_str("1.25").unwrap();
    assert_eq!(x, 1.25);
    assert_eq!(x.precision(), 10);

    // compound assignment keeps the destination's precision
    let mut s = BigFloat::with_precision(4);
    s += &y;
    s *= &y;
    assert_eq!(s.precision(), 4);

    // generators use the default precision, not the destination's
    set_default_prec(70);
    let mut d = BigFloat::with_precision(300);
    let pi = agm_float::const_pi();
    assert_eq!(pi.precision(), 70);
    d.assign(&pi);
    assert_eq!(d.precision(), 300);
    assert_eq!(d, pi);
    set_default_prec(DEFAULT_P);
}

#[test]
fn string_round_trip_floats() {
    for p in [24, 53, 100, DEFAULT_P] {
        for _ in 0..200 {
            let f = (random::<f64>() - 0.5) * 2f64.powi(random::<i32>() % 1000);
            let x = BigFloat::from_f64_prec(f, p);

            let s = x.to_string();
            let back = BigFloat::parse_radix(&s, Radix::Dec, p).unwrap();
            assert_eq!(back, x, "{}", s);

            let e = format!("{:e}", x);
            assert_eq!(BigFloat::parse_radix(&e, Radix::Dec, p).unwrap(), x, "{}", e);

            let h = format!("{:x}", x);
            assert_eq!(BigFloat::parse_radix(&h, Radix::Hex, p).unwrap(), x, "{}", h);
        }
    }

    // computed values with the default precision
    let x = BigFloat::from_u8(2).sqrt();
    assert_eq!(x.to_string().parse::<BigFloat>().unwrap(), x);
    let x = BigFloat::from_u8(10).log();
    assert_eq!(x.to_string().parse::<BigFloat>().unwrap(), x);
}

#[test]
fn string_round_trip_integers() {
    for _ in 0..1000 {
        let i = random::<i64>();
        let x = BigFloat::from_i64(i);
        assert_eq!(x.to_i64(), Some(i));

        let back: BigFloat = x.to_string().parse().unwrap();
        assert_eq!(back.to_i64(), Some(i));

        let u = random::<u128>();
        let x = BigFloat::from_u128(u);
        let back: BigFloat = x.to_string().parse().unwrap();
        assert_eq!(back.to_u128(), Some(u));
    }

    let big = (Integer::from(1) << 300) + 1;
    let x = BigFloat::from_integer(&big);
    let back: BigFloat = x.to_string().parse().unwrap();
    assert_eq!(back.to_integer().unwrap(), big);

    let s = format!("{:.0}", BigFloat::from_integer(&big));
    assert!(s.contains("e+"));

    let fixed = FormatSpec {
        radix: Radix::Dec,
        notation: Notation::Fixed,
        precision: Some(0),
        ..Default::default()
    };
    assert_eq!(x.to_string_with(&fixed).unwrap(), big.to_string());
}

#[test]
fn string_round_trip_rationals() {
    for _ in 0..1000 {
        let n = random::<i64>();
        let d = random::<u32>() as i64 + 1;
        let r = Rational::new(Integer::from(n), Integer::from(d));

        let x = BigFloat::from_rational(&r);
        let back: BigFloat = x.to_string().parse().unwrap();
        assert_eq!(back, x);

        // the float value is within the precision from the rational
        let diff = x.to_rational().unwrap() - &r;
        let err = BigFloat::from_rational(&diff).abs();
        assert!(err <= x.abs().mul_2exp(-(get_default_prec() as i64)));
    }
}

#[test]
fn radix_and_context() {
    set_default_base(Radix::Hex);
    assert_eq!(BigFloat::parse("-a.8").unwrap(), -10.5);
    assert_eq!(format!("{:x}", BigFloat::from_f64(-10.5)), "-a.8");
    set_default_base(Radix::Dec);

    let mut ctx = Context::new();
    ctx.precision(32).radix(Radix::Oct);
    let x = ctx.parse("7.4").unwrap();
    assert_eq!(x.precision(), 32);
    assert_eq!(x, 7.5);

    let p = with_default_context(|ctx| {
        ctx.precision(40);
        ctx.get_precision()
    });
    assert_eq!(p, 40);
    assert_eq!(get_default_prec(), 40);
    set_default_prec(DEFAULT_P);
}

#[test]
fn huge_exponents() {
    let x = BigFloat::from_f64_prec(1e14, 64).exp();
    assert_eq!(x.exponent(), Some(144269504088897));

    let s = format!("{:e}", x);
    assert!(s.starts_with("1.523228696458526"), "{}", s);
    assert!(s.ends_with("e+43429448190325"), "{}", s);
    assert_eq!(BigFloat::parse_radix(&s, Radix::Dec, 64).unwrap(), x);

    let h = format!("{:x}", x);
    assert_eq!(BigFloat::parse_radix(&h, Radix::Hex, 64).unwrap(), x);

    let t = BigFloat::parse_radix("1e-1000000000", Radix::Dec, 64).unwrap();
    assert_eq!(t.exponent(), Some(-3321928094));
    assert_eq!(format!("{:.5e}", t), "1.00000e-1000000000");

    let t = BigFloat::parse_radix("-1e1000000000", Radix::Dec, 64).unwrap();
    assert_eq!(t.exponent(), Some(3321928095));
    assert_eq!(format!("{:.3}", t), "-1e+1000000000");
    assert_eq!(BigFloat::parse_radix(&t.to_string(), Radix::Dec, 64).unwrap(), t);
}
