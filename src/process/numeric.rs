// src/process/numeric.rs
use crate::table::Cell;
use once_cell::sync::Lazy;
use regex::Regex;

/// Sign, digits, optional decimal point and fraction, anchored at the start.
static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?\d+(?:\.\d*)?").expect("leading number regex"));

/// Pull a float out of a cell.
///
/// Numbers pass through (integers promoted). Text yields its leading numeric
/// prefix, so `"1.46m (4ft 9 1/2 in)"` gives `1.46` and `"12/05/2021"` gives
/// `12.0`. A comma ends the number.
pub fn extract_numeric(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Integer(i) => Some(*i as f64),
        Cell::Float(f) => Some(*f),
        Cell::Text(s) => leading_number(s),
        Cell::Missing => None,
    }
}

fn leading_number(s: &str) -> Option<f64> {
    let m = LEADING_NUMBER.find(s)?;
    m.as_str().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    #[test]
    fn numbers_pass_through() {
        assert_eq!(extract_numeric(&Cell::Float(1.485)), Some(1.485));
        assert_eq!(extract_numeric(&Cell::Float(-0.25)), Some(-0.25));
        assert_eq!(extract_numeric(&Cell::Integer(46)), Some(46.0));
    }

    #[test]
    fn text_with_leading_number() {
        assert_eq!(extract_numeric(&text("1.46m (4ft 9 1/2 in)")), Some(1.46));
        assert_eq!(extract_numeric(&text("46%")), Some(46.0));
        assert_eq!(extract_numeric(&text("46")), Some(46.0));
        assert_eq!(extract_numeric(&text("-3.5 kg")), Some(-3.5));
        assert_eq!(extract_numeric(&text("+2[note 1]")), Some(2.0));
        assert_eq!(extract_numeric(&text("1.")), Some(1.0));
    }

    #[test]
    fn text_without_leading_number() {
        assert_eq!(extract_numeric(&text("n/a")), None);
        assert_eq!(extract_numeric(&text("Mildred Didrikson")), None);
        assert_eq!(extract_numeric(&text("approx. 12")), None);
        assert_eq!(extract_numeric(&text(".5")), None);
        assert_eq!(extract_numeric(&text("")), None);
        assert_eq!(extract_numeric(&Cell::Missing), None);
    }

    #[test]
    fn date_like_text_parses_first_field() {
        assert_eq!(extract_numeric(&text("12/05/2021")), Some(12.0));
        assert_eq!(extract_numeric(&text("2021-05-12")), Some(2021.0));
    }

    #[test]
    fn comma_terminates_number() {
        assert_eq!(extract_numeric(&text("1,234 people")), Some(1.0));
        assert_eq!(extract_numeric(&text("3,5")), Some(3.0));
    }

    #[test]
    fn overflowing_prefix_is_absent() {
        let huge = "9".repeat(400);
        assert_eq!(extract_numeric(&text(&huge)), None);
    }
}
