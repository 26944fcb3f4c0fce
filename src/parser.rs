//! Parser parses numbers represented in positional notation with an optional exponent.
//!
//! Accepted input: optional surrounding whitespace, an optional sign, digits of the radix with an optional
//! radix point, and an optional exponent. The exponent marker is `e` or `E` for radices up to 10, and `@`
//! for any radix. The exponent is written in decimal and denotes a power of the radix.
//! `inf` and `nan` are recognized in any letter case.

use crate::defs::Exponent;
use crate::defs::Sign;
use crate::defs::EXPONENT_MAX;
use crate::Radix;

use std::str::Chars;

pub struct ParserState<'a> {
    chars: Chars<'a>,
    cur_ch: Option<char>,
    sign: Sign,
    mantissa_bytes: Vec<u8>,
    e: Exponent,
    inf: bool,
    nan: bool,
    valid: bool,
}

impl<'a> ParserState<'a> {
    fn new(s: &'a str) -> Self {
        ParserState {
            chars: s.chars(),
            cur_ch: None,
            sign: Sign::Pos,
            mantissa_bytes: Vec::new(),
            e: 0,
            inf: false,
            nan: false,
            valid: false,
        }
    }

    /// Returns next character of a string in lower case,
    /// or None if string end reached.
    fn next_char(&mut self) -> Option<char> {
        self.cur_ch = self.chars.next().map(|c| c.to_ascii_lowercase());
        self.cur_ch
    }

    fn cur_char(&self) -> Option<char> {
        self.cur_ch
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn is_inf(&self) -> bool {
        self.inf
    }

    pub fn is_nan(&self) -> bool {
        self.nan
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// Returns mantissa digits, sign, exponent.
    /// The value is `0.d1d2d3... * radix^exponent`.
    pub fn raw_parts(&self) -> (&[u8], Sign, Exponent) {
        (&self.mantissa_bytes, self.sign, self.e)
    }
}

/// Parse a number in radix `rdx`.
pub fn parse(s: &str, rdx: Radix) -> ParserState<'_> {
    let mut parser_state = ParserState::new(s.trim());
    let mut ch = parser_state.next_char();

    // sign
    if let Some(c) = ch {
        match c {
            '+' => ch = parser_state.next_char(),
            '-' => {
                parser_state.sign = Sign::Neg;
                ch = parser_state.next_char()
            }
            _ => {}
        };
    }

    if let Some(c) = ch {
        if c == 'i' {
            parse_word(&mut parser_state, "inf");
            parser_state.inf = parser_state.valid;
        } else if c == 'n' {
            parse_word(&mut parser_state, "nan");
            parser_state.nan = parser_state.valid;
        } else if c == '.' || is_radix_digit(c, rdx) {
            parse_num(&mut parser_state, rdx);
        }
    }

    // trailing characters
    if parser_state.cur_char().is_some() {
        parser_state.valid = false;
        parser_state.inf = false;
        parser_state.nan = false;
    }

    parser_state
}

// the current character is the first character of the word
fn parse_word(parser_state: &mut ParserState, word: &str) {
    let mut ch = parser_state.cur_char();

    for expected in word.chars() {
        if ch != Some(expected) {
            return;
        }
        ch = parser_state.next_char();
    }

    parser_state.valid = true;
}

fn parse_num(parser_state: &mut ParserState, rdx: Radix) {
    let (int_len, skip_cnt1) = parse_digits(parser_state, true, true, rdx);
    if Some('.') == parser_state.cur_char() {
        parser_state.next_char();
    }
    let (frac_len, skip_cnt2) = parse_digits(parser_state, int_len == 0, false, rdx);

    if frac_len > 0 || int_len > 0 {
        parser_state.valid = true;
        if int_len != 0 {
            parser_state.e = int_len as Exponent;
        } else {
            parser_state.e = -(skip_cnt2 as Exponent);
        }
    } else if skip_cnt1 > 0 || skip_cnt2 > 0 {
        // just zeroes
        parser_state.valid = true;
    }

    if parser_state.valid {
        match parser_state.cur_char() {
            Some('@') => parse_exp(parser_state),
            Some('e') if rdx.base() <= 10 => parse_exp(parser_state),
            _ => {}
        }
    }
}

fn parse_digits(
    parser_state: &mut ParserState,
    skip_zeroes: bool,
    int: bool,
    rdx: Radix,
) -> (usize, usize) {
    let mut ch = parser_state.cur_char();
    let mut len = 0;
    let mut skip_cnt = 0;
    if skip_zeroes {
        // skip leading zeroes
        while let Some(c) = ch {
            if c == '0' {
                skip_cnt += 1;
                if !int {
                    len += 1; // for fractional part count length
                }
            } else {
                break;
            }
            ch = parser_state.next_char();
        }
    }
    while let Some(c) = ch {
        match c.to_digit(rdx.base()) {
            Some(d) => {
                parser_state.mantissa_bytes.push(d as u8);
                len += 1;
            }
            None => break,
        }
        ch = parser_state.next_char();
    }
    if skip_cnt == len {
        // just zeroes
        len = 0;
    }
    (len, skip_cnt)
}

fn is_radix_digit(c: char, rdx: Radix) -> bool {
    c.is_digit(rdx.base())
}

// the current character is the exponent marker
fn parse_exp(parser_state: &mut ParserState) {
    let mut neg = false;
    let mut ch = parser_state.next_char();
    if let Some(c) = ch {
        match c {
            '+' => {
                ch = parser_state.next_char();
            }
            '-' => {
                neg = true;
                ch = parser_state.next_char();
            }
            _ => {}
        };
    }

    let mut e: Exponent = 0;
    let mut digits = 0;
    while let Some(d) = ch.and_then(|c| c.to_digit(10)) {
        if e > EXPONENT_MAX / 10 {
            parser_state.valid = false;
            return;
        }
        e = e * 10 + d as Exponent;
        digits += 1;
        ch = parser_state.next_char();
    }

    if digits == 0 {
        parser_state.valid = false;
        return;
    }

    if neg {
        e = -e;
    }

    if !parser_state.mantissa_bytes.is_empty() {
        parser_state.e += e;
    }
}
