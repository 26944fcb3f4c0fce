//! Formatting of numbers.
//!
//! `BigFloat::to_string_with` formats a number according to a `FormatSpec`.
//! The `std::fmt` traits are implemented on top of it: `Display` uses the general notation in decimal,
//! `LowerExp` and `UpperExp` the scientific notation in decimal, and `LowerHex`, `UpperHex`, `Octal`, `Binary`
//! the general notation in the corresponding radix. The formatter's width, fill, alignment, precision,
//! and the `+`, `#`, `0` flags are honored.

use crate::ctx::get_default_base;
use crate::defs::Error;
use crate::defs::Exponent;
use crate::defs::Radix;
use crate::num::digits_for_precision;
use crate::num::FloatNumber;
use crate::BigFloat;
use core::fmt::Alignment;
use core::fmt::Binary;
use core::fmt::Display;
use core::fmt::Formatter;
use core::fmt::LowerExp;
use core::fmt::LowerHex;
use core::fmt::Octal;
use core::fmt::UpperExp;
use core::fmt::UpperHex;
use itertools::repeat_n;

/// Notation of a formatted number.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Notation {
    /// Positional or scientific, whichever is shorter for the exponent, like `%g`.
    General,

    /// Positional with a fixed number of digits after the radix point, like `%f`.
    Fixed,

    /// One digit before the radix point and an exponent, like `%e`.
    Scientific,
}

/// Placement of the fill characters when the formatted number is shorter than the width.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Align {
    /// Fill after the number.
    Left,

    /// Fill before the number.
    Right,

    /// Fill on both sides.
    Center,

    /// Fill between the sign or radix prefix and the first digit.
    Internal,
}

/// Formatting parameters.
#[derive(Debug, Clone)]
pub struct FormatSpec {
    /// Radix of the digits.
    pub radix: Radix,

    /// Notation.
    pub notation: Notation,

    /// For the general and the scientific notation the number of significant digits, or the number of digits
    /// after the radix point for the fixed notation. None gives as many digits as needed to restore the value
    /// by parsing at the same precision.
    pub precision: Option<usize>,

    /// Minimum number of characters in the output.
    pub width: usize,

    /// Fill character.
    pub fill: char,

    /// Placement of the fill characters.
    pub align: Align,

    /// Prints `+` for positive numbers.
    pub show_pos: bool,

    /// Prints the radix prefix: `0x` for hexadecimal, `0` for octal, `0b` for binary.
    pub show_base: bool,

    /// Always prints the radix point, and keeps trailing zeroes in the general notation.
    pub show_point: bool,

    /// Prints digits, the exponent marker, and the radix prefix in upper case.
    pub uppercase: bool,
}

impl Default for FormatSpec {
    /// General notation in the default radix of the context with no padding.
    fn default() -> Self {
        FormatSpec {
            radix: get_default_base(),
            notation: Notation::General,
            precision: None,
            width: 0,
            fill: ' ',
            align: Align::Right,
            show_pos: false,
            show_base: false,
            show_point: false,
            uppercase: false,
        }
    }
}

impl BigFloat {
    /// Formats `self` according to `spec`.
    ///
    /// ## Errors
    ///
    ///  - MemoryAllocation: failed to allocate memory for the output.
    pub fn to_string_with(&self, spec: &FormatSpec) -> Result<String, Error> {
        let (sign, prefix, body) = if self.is_nan() {
            ("", "", String::from("NaN"))
        } else if let Some(v) = self.as_number() {
            let body = match spec.notation {
                Notation::General => fmt_general(v, self.precision(), spec)?,
                Notation::Fixed => fmt_fixed(v, self.precision(), spec)?,
                Notation::Scientific => fmt_scientific(v, self.precision(), spec)?,
            };
            let body = if spec.uppercase { body.to_ascii_uppercase() } else { body };
            (sign_str(v.is_negative(), spec), radix_prefix(spec), body)
        } else {
            (sign_str(self.is_inf_neg(), spec), "", String::from("Inf"))
        };

        pad(sign, prefix, &body, spec)
    }

    fn fmt_radix(&self, f: &mut Formatter, rdx: Radix, notation: Notation, uppercase: bool) -> core::fmt::Result {
        let align = if f.sign_aware_zero_pad() {
            Align::Internal
        } else {
            match f.align() {
                Some(Alignment::Left) => Align::Left,
                Some(Alignment::Center) => Align::Center,
                Some(Alignment::Right) | None => Align::Right,
            }
        };

        let spec = FormatSpec {
            radix: rdx,
            notation,
            precision: f.precision(),
            width: f.width().unwrap_or(0),
            fill: if f.sign_aware_zero_pad() { '0' } else { f.fill() },
            align,
            show_pos: f.sign_plus(),
            show_base: f.alternate(),
            show_point: false,
            uppercase,
        };

        let s = self.to_string_with(&spec).map_err(|_| core::fmt::Error)?;
        f.write_str(&s)
    }
}

fn sign_str(is_negative: bool, spec: &FormatSpec) -> &'static str {
    if is_negative {
        "-"
    } else if spec.show_pos {
        "+"
    } else {
        ""
    }
}

fn radix_prefix(spec: &FormatSpec) -> &'static str {
    if !spec.show_base {
        return "";
    }

    match (spec.radix, spec.uppercase) {
        (Radix::Bin, false) => "0b",
        (Radix::Bin, true) => "0B",
        (Radix::Oct, _) => "0",
        (Radix::Dec, _) => "",
        (Radix::Hex, false) => "0x",
        (Radix::Hex, true) => "0X",
    }
}

fn exponent_marker(rdx: Radix) -> char {
    if rdx.base() <= 10 {
        'e'
    } else {
        '@'
    }
}

fn pad(sign: &str, prefix: &str, body: &str, spec: &FormatSpec) -> Result<String, Error> {
    let len = sign.chars().count() + prefix.chars().count() + body.chars().count();
    let fill_len = spec.width.saturating_sub(len);

    let mut ret = String::new();
    ret.try_reserve_exact(sign.len() + prefix.len() + body.len() + fill_len * spec.fill.len_utf8())?;

    let (before, after) = match spec.align {
        Align::Left => (0, fill_len),
        Align::Right => (fill_len, 0),
        Align::Center => (fill_len / 2, fill_len - fill_len / 2),
        Align::Internal => (0, 0),
    };

    ret.extend(repeat_n(spec.fill, before));
    ret.push_str(sign);
    ret.push_str(prefix);
    if spec.align == Align::Internal {
        ret.extend(repeat_n(spec.fill, fill_len));
    }
    ret.push_str(body);
    ret.extend(repeat_n(spec.fill, after));

    Ok(ret)
}

// pads `digits` with trailing zeroes up to `n` digits
fn zero_extend(digits: &mut String, n: usize) {
    let len = digits.len();
    if len < n {
        digits.extend(repeat_n('0', n - len));
    }
}

// value `0.d1d2d3... * rdx^k` in positional notation
fn positional(digits: &str, k: Exponent, show_point: bool) -> String {
    let l = digits.len() as Exponent;
    let mut ret = String::new();

    if k <= 0 {
        ret.push_str("0.");
        ret.extend(repeat_n('0', (-k) as usize));
        ret.push_str(digits);
    } else if k < l {
        ret.push_str(&digits[..k as usize]);
        ret.push('.');
        ret.push_str(&digits[k as usize..]);
    } else {
        ret.push_str(digits);
        ret.extend(repeat_n('0', (k - l) as usize));
        if show_point {
            ret.push('.');
        }
    }

    ret
}

// value `d1.d2d3... * rdx^x`
fn scientific(digits: &str, x: Exponent, rdx: Radix, show_point: bool) -> String {
    let mut ret = String::new();

    ret.push_str(&digits[..1]);
    if digits.len() > 1 || show_point {
        ret.push('.');
        ret.push_str(&digits[1..]);
    }
    ret.push(exponent_marker(rdx));
    ret.push_str(&format!("{:+03}", x));

    ret
}

fn fmt_general(v: &FloatNumber, p: usize, spec: &FormatSpec) -> Result<String, Error> {
    let rdx = spec.radix;
    let (n, p_eff) = match spec.precision {
        Some(n) => (n.max(1), n.max(1)),
        None => (0, digits_for_precision(p, rdx)),
    };

    let (_, mut digits, mut k) = v.to_digits(rdx, n, p)?;
    if digits.is_empty() {
        digits.push('0');
        k = 1;
    }

    if spec.show_point && spec.precision.is_some() {
        zero_extend(&mut digits, p_eff);
    }

    let x = k - 1;
    if x < -4 || x >= p_eff as Exponent {
        Ok(scientific(&digits, x, rdx, spec.show_point))
    } else {
        Ok(positional(&digits, k, spec.show_point))
    }
}

fn fmt_scientific(v: &FloatNumber, p: usize, spec: &FormatSpec) -> Result<String, Error> {
    let rdx = spec.radix;
    let n = spec.precision.map(|n| n + 1).unwrap_or(0);

    let (_, mut digits, mut k) = v.to_digits(rdx, n, p)?;
    if digits.is_empty() {
        digits.push('0');
        k = 1;
    }

    if let Some(n) = spec.precision {
        zero_extend(&mut digits, n + 1);
    }

    Ok(scientific(&digits, k - 1, rdx, spec.show_point))
}

fn fmt_fixed(v: &FloatNumber, p: usize, spec: &FormatSpec) -> Result<String, Error> {
    let rdx = spec.radix;

    let q = match spec.precision {
        Some(q) => q,
        None => {
            let (_, _, k) = v.to_digits(rdx, 0, p)?;
            (digits_for_precision(p, rdx) as Exponent - k).max(0) as usize
        }
    };

    let mut s = v.scaled_round(rdx, q as Exponent)?.to_str_radix(rdx.base());
    if s.len() <= q {
        s.insert_str(0, &"0".repeat(q + 1 - s.len()));
    }

    let (int, frac) = s.split_at(s.len() - q);
    let frac = if spec.precision.is_none() && !spec.show_point {
        frac.trim_end_matches('0')
    } else {
        frac
    };

    let mut ret = String::from(int);
    if !frac.is_empty() || spec.show_point {
        ret.push('.');
        ret.push_str(frac);
    }

    Ok(ret)
}

impl Display for BigFloat {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        self.fmt_radix(f, Radix::Dec, Notation::General, false)
    }
}

impl LowerExp for BigFloat {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        self.fmt_radix(f, Radix::Dec, Notation::Scientific, false)
    }
}

impl UpperExp for BigFloat {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        self.fmt_radix(f, Radix::Dec, Notation::Scientific, true)
    }
}

impl LowerHex for BigFloat {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        self.fmt_radix(f, Radix::Hex, Notation::General, false)
    }
}

impl UpperHex for BigFloat {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        self.fmt_radix(f, Radix::Hex, Notation::General, true)
    }
}

impl Octal for BigFloat {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        self.fmt_radix(f, Radix::Oct, Notation::General, false)
    }
}

impl Binary for BigFloat {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        self.fmt_radix(f, Radix::Bin, Notation::General, false)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::Sign;
    use rand::random;

    fn spec(radix: Radix, notation: Notation, precision: Option<usize>) -> FormatSpec {
        FormatSpec {
            radix,
            notation,
            precision,
            ..Default::default()
        }
    }

    fn f(v: f64) -> BigFloat {
        BigFloat::from_f64_prec(v, 53)
    }

    #[test]
    fn test_general() {
        assert_eq!(f(1.5).to_string(), "1.5");
        assert_eq!(f(-100.0).to_string(), "-100");
        assert_eq!(f(0.0).to_string(), "0");
        assert_eq!(f(1e20).to_string(), "1e+20");
        assert_eq!(f(0.00048828125).to_string(), "0.00048828125");
        assert_eq!(f(0.000030517578125).to_string(), "3.0517578125e-05");
        assert_eq!(f(0.1).to_string(), "0.10000000000000001");
        assert_eq!(format!("{:.3}", f(1.0 / 3.0)), "0.333");
        assert_eq!(format!("{:.3}", f(123456.0)), "1.23e+05");
        assert_eq!(format!("{:.1}", f(9.99)), "1e+01");

        let mut s = spec(Radix::Dec, Notation::General, Some(3));
        s.show_point = true;
        assert_eq!(f(2.0).to_string_with(&s).unwrap(), "2.00");
        assert_eq!(f(0.0).to_string_with(&s).unwrap(), "0.00");
    }

    #[test]
    fn test_fixed_scientific() {
        let s0 = spec(Radix::Dec, Notation::Fixed, Some(0));
        assert_eq!(f(2.5).to_string_with(&s0).unwrap(), "2");
        assert_eq!(f(3.5).to_string_with(&s0).unwrap(), "4");

        let s4 = spec(Radix::Dec, Notation::Fixed, Some(4));
        assert_eq!(f(1.0 / 3.0).to_string_with(&s4).unwrap(), "0.3333");
        assert_eq!(f(12.5).to_string_with(&s4).unwrap(), "12.5000");
        assert_eq!(f(-0.001).to_string_with(&spec(Radix::Dec, Notation::Fixed, Some(2))).unwrap(), "-0.00");

        let sn = spec(Radix::Dec, Notation::Fixed, None);
        assert_eq!(f(1e20).to_string_with(&sn).unwrap(), "100000000000000000000");
        assert_eq!(f(0.25).to_string_with(&sn).unwrap(), "0.25");
        assert_eq!(f(0.0).to_string_with(&sn).unwrap(), "0");

        let se = spec(Radix::Dec, Notation::Scientific, Some(2));
        assert_eq!(f(1234.5).to_string_with(&se).unwrap(), "1.23e+03");
        assert_eq!(f(0.0).to_string_with(&se).unwrap(), "0.00e+00");
        assert_eq!(f(-1e-300).to_string_with(&se).unwrap(), "-1.00e-300");

        assert_eq!(format!("{:e}", f(1234.5)), "1.2345e+03");
        assert_eq!(format!("{:E}", f(1234.5)), "1.2345E+03");
        assert_eq!(format!("{:.0e}", f(5.0)), "5e+00");
    }

    #[test]
    fn test_radix() {
        assert_eq!(format!("{:x}", f(255.5)), "ff.8");
        assert_eq!(format!("{:#X}", f(255.5)), "0XFF.8");
        assert_eq!(format!("{:o}", f(8.0)), "10");
        assert_eq!(format!("{:#o}", f(8.0)), "010");
        assert_eq!(format!("{:#b}", f(-2.5)), "-0b10.1");

        let sh = spec(Radix::Hex, Notation::Scientific, None);
        assert_eq!(f(255.5).to_string_with(&sh).unwrap(), "f.f8@+01");
        let sb = spec(Radix::Bin, Notation::Scientific, None);
        assert_eq!(f(0.75).to_string_with(&sb).unwrap(), "1.1e-01");
    }

    #[test]
    fn test_special_and_padding() {
        assert_eq!(BigFloat::nan().to_string(), "NaN");
        assert_eq!(BigFloat::inf(Sign::Neg).to_string(), "-Inf");
        assert_eq!(format!("{:+}", BigFloat::inf(Sign::Pos)), "+Inf");
        assert_eq!(format!("{:+}", f(1.5)), "+1.5");

        assert_eq!(format!("{:8}", f(1.5)), "     1.5");
        assert_eq!(format!("{:<8}", f(1.5)), "1.5     ");
        assert_eq!(format!("{:^7}", f(1.5)), "  1.5  ");
        assert_eq!(format!("{:*^9}", f(1.5)), "***1.5***");
        assert_eq!(format!("{:08}", f(-1.5)), "-00001.5");
        assert_eq!(format!("{:#08x}", f(255.0)), "0x0000ff");
        assert_eq!(format!("{:6}", BigFloat::nan()), "   NaN");

        let mut s = spec(Radix::Dec, Notation::General, None);
        s.width = 7;
        s.fill = '_';
        s.align = Align::Internal;
        s.show_pos = true;
        assert_eq!(f(2.0).to_string_with(&s).unwrap(), "+_____2");
    }

    #[test]
    fn test_round_trip() {
        for _ in 0..1000 {
            let v = (random::<f64>() - 0.5) * 10f64.powi(random::<i32>() % 300);
            let d = f(v);
            for notation in [Notation::General, Notation::Fixed, Notation::Scientific] {
                for rdx in [Radix::Bin, Radix::Oct, Radix::Dec, Radix::Hex] {
                    let s = d.to_string_with(&spec(rdx, notation, None)).unwrap();
                    let back = BigFloat::parse_radix(&s, rdx, 53).unwrap();
                    assert_eq!(back, d, "{} {:?} {:?}", s, rdx, notation);
                }
            }
        }
    }
}
