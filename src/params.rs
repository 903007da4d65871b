use crate::math::FoldParams;

/// Raw text of the four parameter fields, exactly as typed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParameterInputs {
    pub bend_radius: String,
    pub tube_radius: String,
    pub phi: String,
    pub thickness: String,
}

impl ParameterInputs {
    pub fn new(bend_radius: &str, tube_radius: &str, phi: &str, thickness: &str) -> Self {
        Self {
            bend_radius: bend_radius.to_string(),
            tube_radius: tube_radius.to_string(),
            phi: phi.to_string(),
            thickness: thickness.to_string(),
        }
    }

    /// Unreadable fields become NaN and are left for the geometry to absorb.
    pub fn parse(&self) -> FoldParams {
        FoldParams {
            bend_radius: parse_field(&self.bend_radius),
            tube_radius: parse_field(&self.tube_radius),
            phi_deg: parse_field(&self.phi),
            thickness: parse_field(&self.thickness),
        }
    }

    /// Query pairs of the pattern request, in wire order.
    pub fn query_pairs(&self) -> [(&'static str, &str); 5] {
        [
            ("f", "png"),
            ("R", &self.bend_radius),
            ("r", &self.tube_radius),
            ("phi", &self.phi),
            ("t", &self.thickness),
        ]
    }
}

/// Decimal notation only. `f64::from_str` also takes `inf` and `nan`, which
/// count as unreadable here.
fn parse_field(text: &str) -> f64 {
    let text = text.trim();
    let decimal = text
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !decimal {
        return f64::NAN;
    }
    text.parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_numbers() {
        let p = ParameterInputs::new("2", " 3 ", "90", "0.5").parse();
        assert_eq!(p.bend_radius, 2.0);
        assert_eq!(p.tube_radius, 3.0);
        assert_eq!(p.phi_deg, 90.0);
        assert_eq!(p.thickness, 0.5);
    }

    #[test]
    fn malformed_fields_become_nan() {
        let p = ParameterInputs::new("", "abc", "90deg", "1e-1").parse();
        assert!(p.bend_radius.is_nan());
        assert!(p.tube_radius.is_nan());
        assert!(p.phi_deg.is_nan());
        assert_eq!(p.thickness, 0.1);
    }

    #[test]
    fn spelled_out_specials_become_nan() {
        for text in ["inf", "-infinity", "Infinity", "NaN", "nan"] {
            let p = ParameterInputs::new(text, "3", "90", "0.5").parse();
            assert!(p.bend_radius.is_nan(), "{text} parsed as {}", p.bend_radius);
        }
        let p = ParameterInputs::new("-2.5", "+3", "9e1", ".5").parse();
        assert_eq!(p.bend_radius, -2.5);
        assert_eq!(p.tube_radius, 3.0);
        assert_eq!(p.phi_deg, 90.0);
        assert_eq!(p.thickness, 0.5);
    }

    #[test]
    fn query_keeps_typed_text() {
        let inputs = ParameterInputs::new("2", "3", "90", "0.50");
        let pairs = inputs.query_pairs();
        assert_eq!(pairs[0], ("f", "png"));
        assert_eq!(pairs[4], ("t", "0.50"));
    }
}
