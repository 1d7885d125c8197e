//! Cone-loss simulation
//!
//! Each dichromacy is modelled by replacing the response of the missing
//! cone class with a linear combination of the two remaining ones
//! (Brettel-derived coefficients). The other two responses pass through
//! untouched.

use std::fmt;
use std::str::FromStr;

use crate::api::CvdError;
use crate::color::Lms;

/// Protanopia: L rebuilt from M and S.
pub const PROTANOPIA: [f64; 3] = [0.0, 2.02344, -2.52580];
/// Deuteranopia: M rebuilt from L and S.
pub const DEUTERANOPIA: [f64; 3] = [0.494207, 0.0, 1.24827];
/// Tritanopia: S rebuilt from L and M.
pub const TRITANOPIA: [f64; 3] = [-0.395913, 0.801109, 0.0];

/// A cone photoreceptor class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cone {
    /// Long-wavelength ("red") cones
    Long,
    /// Medium-wavelength ("green") cones
    Medium,
    /// Short-wavelength ("blue") cones
    Short,
}

/// Color vision deficiency to simulate.
///
/// There is deliberately no "none" variant: leaving an image untouched is
/// the caller's decision, not a transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Deficiency {
    /// Complete loss of L-cone function
    Protanopia,
    /// Complete loss of M-cone function
    Deuteranopia,
    /// Complete loss of S-cone function
    Tritanopia,
}

impl Deficiency {
    /// All supported deficiencies.
    pub const ALL: [Deficiency; 3] = [
        Deficiency::Protanopia,
        Deficiency::Deuteranopia,
        Deficiency::Tritanopia,
    ];

    /// Canonical lowercase name, as used in file names and query strings.
    pub fn name(self) -> &'static str {
        match self {
            Deficiency::Protanopia => "protanopia",
            Deficiency::Deuteranopia => "deuteranopia",
            Deficiency::Tritanopia => "tritanopia",
        }
    }

    /// The cone class whose response is replaced.
    pub fn affected_cone(self) -> Cone {
        match self {
            Deficiency::Protanopia => Cone::Long,
            Deficiency::Deuteranopia => Cone::Medium,
            Deficiency::Tritanopia => Cone::Short,
        }
    }

    /// Coefficients `[kl, km, ks]` of the replacement row.
    pub fn coefficients(self) -> [f64; 3] {
        match self {
            Deficiency::Protanopia => PROTANOPIA,
            Deficiency::Deuteranopia => DEUTERANOPIA,
            Deficiency::Tritanopia => TRITANOPIA,
        }
    }

    /// Recompute the affected cone response; the other two pass through.
    ///
    /// # Example
    /// ```
    /// use cvd_engine::{color::Lms, Deficiency};
    ///
    /// let lms = Lms::new(0.4, 0.5, 0.1);
    /// let out = Deficiency::Tritanopia.simulate(lms);
    /// assert_eq!(out.l, 0.4);
    /// assert_eq!(out.m, 0.5);
    /// assert_ne!(out.s, 0.1);
    /// ```
    #[inline]
    pub fn simulate(self, lms: Lms) -> Lms {
        let Lms { l, m, s } = lms;
        let [kl, km, ks] = self.coefficients();
        let replaced = kl * l + km * m + ks * s;
        match self.affected_cone() {
            Cone::Long => Lms::new(replaced, m, s),
            Cone::Medium => Lms::new(l, replaced, s),
            Cone::Short => Lms::new(l, m, replaced),
        }
    }
}

/// Tuple form of [`Deficiency::simulate`].
#[inline]
pub fn simulate_deficiency(l: f64, m: f64, s: f64, deficiency: Deficiency) -> (f64, f64, f64) {
    let out = deficiency.simulate(Lms::new(l, m, s));
    (out.l, out.m, out.s)
}

impl fmt::Display for Deficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Deficiency {
    type Err = CvdError;

    /// Parse a deficiency name.
    ///
    /// Accepts the full name, the short clinical form (`protan`, `deutan`,
    /// `tritan`) and the single-letter codes `p`, `d`, `t`. Matching is
    /// case-insensitive and ignores surrounding whitespace. Anything else is
    /// rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "protanopia" | "protan" | "p" => Ok(Deficiency::Protanopia),
            "deuteranopia" | "deutan" | "d" => Ok(Deficiency::Deuteranopia),
            "tritanopia" | "tritan" | "t" => Ok(Deficiency::Tritanopia),
            _ => Err(CvdError::UnknownDeficiency(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ErrorKind;

    #[test]
    fn test_only_affected_cone_changes() {
        let lms = Lms::new(0.3, 0.6, 0.2);
        for deficiency in Deficiency::ALL {
            let out = deficiency.simulate(lms);
            match deficiency.affected_cone() {
                Cone::Long => {
                    assert_eq!((out.m, out.s), (lms.m, lms.s));
                    assert_ne!(out.l, lms.l);
                }
                Cone::Medium => {
                    assert_eq!((out.l, out.s), (lms.l, lms.s));
                    assert_ne!(out.m, lms.m);
                }
                Cone::Short => {
                    assert_eq!((out.l, out.m), (lms.l, lms.m));
                    assert_ne!(out.s, lms.s);
                }
            }
        }
    }

    #[test]
    fn test_replacement_ignores_affected_cone() {
        // The replaced response must not depend on its own input value
        for deficiency in Deficiency::ALL {
            let a = deficiency.simulate(Lms::new(0.1, 0.1, 0.1));
            let b = match deficiency.affected_cone() {
                Cone::Long => deficiency.simulate(Lms::new(0.9, 0.1, 0.1)),
                Cone::Medium => deficiency.simulate(Lms::new(0.1, 0.9, 0.1)),
                Cone::Short => deficiency.simulate(Lms::new(0.1, 0.1, 0.9)),
            };
            match deficiency.affected_cone() {
                Cone::Long => assert_eq!(a.l, b.l),
                Cone::Medium => assert_eq!(a.m, b.m),
                Cone::Short => assert_eq!(a.s, b.s),
            }
        }
    }

    #[test]
    fn test_coefficients_match_simulation() {
        let lms = Lms::new(0.7, 0.2, 0.4);
        for deficiency in Deficiency::ALL {
            let [kl, km, ks] = deficiency.coefficients();
            let expected = kl * lms.l + km * lms.m + ks * lms.s;
            let out = deficiency.simulate(lms);
            let got = match deficiency.affected_cone() {
                Cone::Long => out.l,
                Cone::Medium => out.m,
                Cone::Short => out.s,
            };
            assert!((got - expected).abs() < 1e-12, "{deficiency}: {got} vs {expected}");
        }
    }

    #[test]
    fn test_unit_responses_select_coefficients() {
        for deficiency in Deficiency::ALL {
            let [kl, km, ks] = deficiency.coefficients();
            let pick = |out: Lms| match deficiency.affected_cone() {
                Cone::Long => out.l,
                Cone::Medium => out.m,
                Cone::Short => out.s,
            };
            assert_eq!(pick(deficiency.simulate(Lms::new(1.0, 0.0, 0.0))), kl);
            assert_eq!(pick(deficiency.simulate(Lms::new(0.0, 1.0, 0.0))), km);
            assert_eq!(pick(deficiency.simulate(Lms::new(0.0, 0.0, 1.0))), ks);
        }
    }

    #[test]
    fn test_tuple_form() {
        let (l, m, s) = simulate_deficiency(1.0, 1.0, 1.0, Deficiency::Protanopia);
        assert!((l - (2.02344 - 2.52580)).abs() < 1e-12);
        assert_eq!((m, s), (1.0, 1.0));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("protanopia".parse(), Ok(Deficiency::Protanopia));
        assert_eq!("Deuteranopia".parse(), Ok(Deficiency::Deuteranopia));
        assert_eq!("  TRITANOPIA ".parse(), Ok(Deficiency::Tritanopia));
        assert_eq!("protan".parse(), Ok(Deficiency::Protanopia));
        assert_eq!("d".parse(), Ok(Deficiency::Deuteranopia));
        assert_eq!("t".parse(), Ok(Deficiency::Tritanopia));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        for input in ["", "none", "normal", "achromatopsia", "protanomaly"] {
            let err = input.parse::<Deficiency>().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
            assert_eq!(err, CvdError::UnknownDeficiency(input.to_string()));
        }
    }

    #[test]
    fn test_display_round_trips() {
        for deficiency in Deficiency::ALL {
            assert_eq!(deficiency.to_string().parse(), Ok(deficiency));
        }
    }
}
