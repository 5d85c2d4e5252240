//! The closed set of base kernel formulas
//!
//! Each variant carries the parameters its formula reads. Parameters are
//! stored as [`Param`] values so that an upstream computation can hand in a
//! tensor of any admissible shape; shapes are checked by [`Formula::validate`]
//! once the active feature count is known.

use covar_core::{KernelFloat, Param, Result};

/// Variance and lengthscale shared by the stationary family
#[derive(Debug, Clone, PartialEq)]
pub struct Scaled<T> {
    /// Signal variance `σ²` (scalar)
    pub variance: Param<T>,
    /// Distance rescaling, scalar or one value per active feature
    pub lengthscale: Param<T>,
}

impl<T: KernelFloat> Scaled<T> {
    pub fn new(variance: impl Into<Param<T>>, lengthscale: impl Into<Param<T>>) -> Self {
        Self {
            variance: variance.into(),
            lengthscale: lengthscale.into(),
        }
    }
}

/// A base covariance formula
#[derive(Debug, Clone, PartialEq)]
pub enum Formula<T> {
    /// `σ²` everywhere
    Bias { variance: Param<T> },
    /// `σ²·I` under self-covariance, zero otherwise
    White { variance: Param<T> },
    /// `σ²·exp(−d²/2)`
    Rbf(Scaled<T>),
    /// `σ²·(1 + d²/(2α))^(−α)`
    RationalQuadratic { scaled: Scaled<T>, alpha: Param<T> },
    /// `(X·Λ)·X'ᵀ`
    Linear { variances: Param<T> },
    /// `((X·Λ)·X'ᵀ + offset)^degree`
    Polynomial {
        variances: Param<T>,
        offset: Param<T>,
        degree: Param<T>,
    },
    /// `σ²·exp(−d/2)`
    Exponential(Scaled<T>),
    /// `σ²·exp(−d)`
    Matern12(Scaled<T>),
    /// `σ²·(1 + √3·d)·exp(−√3·d)`
    Matern32(Scaled<T>),
    /// `σ²·(1 + √5·d + 5d²/3)·exp(−√5·d)`
    Matern52(Scaled<T>),
    /// `σ²·cos(d)`
    Cosine(Scaled<T>),
    /// `σ²·exp(−0.5·(sin(π·d/period)/ℓ)²)` over the unscaled full-feature distance
    Periodic {
        variance: Param<T>,
        lengthscale: Param<T>,
        period: Param<T>,
    },
}

/// How a parameter's length is constrained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arity {
    Scalar,
    PerFeature,
}

impl<T: KernelFloat> Formula<T> {
    /// Lower-case kernel name, used in messages and expression rendering
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bias { .. } => "bias",
            Self::White { .. } => "white",
            Self::Rbf(_) => "rbf",
            Self::RationalQuadratic { .. } => "rational_quadratic",
            Self::Linear { .. } => "linear",
            Self::Polynomial { .. } => "polynomial",
            Self::Exponential(_) => "exponential",
            Self::Matern12(_) => "matern12",
            Self::Matern32(_) => "matern32",
            Self::Matern52(_) => "matern52",
            Self::Cosine(_) => "cosine",
            Self::Periodic { .. } => "periodic",
        }
    }

    /// Whether the formula reads feature values through the active dimensions
    ///
    /// Bias and White depend on shape only; Periodic always uses every feature.
    pub fn uses_active_dims(&self) -> bool {
        !matches!(
            self,
            Self::Bias { .. } | Self::White { .. } | Self::Periodic { .. }
        )
    }

    /// Named parameters in declaration order
    pub fn parameters(&self) -> Vec<(&'static str, &Param<T>)> {
        self.signature()
            .into_iter()
            .map(|(name, param, _)| (name, param))
            .collect()
    }

    /// Check every parameter's length against the active feature count
    pub fn validate(&self, n_active: usize) -> Result<()> {
        let kernel = self.name();
        for (name, param, arity) in self.signature() {
            match arity {
                Arity::Scalar => param.scalar_value(kernel, name).map(|_| ())?,
                Arity::PerFeature => param.check_features(kernel, name, n_active)?,
            }
        }
        Ok(())
    }

    fn signature(&self) -> Vec<(&'static str, &Param<T>, Arity)> {
        use Arity::{PerFeature, Scalar};
        match self {
            Self::Bias { variance } | Self::White { variance } => {
                vec![("variance", variance, Scalar)]
            }
            Self::Rbf(s)
            | Self::Exponential(s)
            | Self::Matern12(s)
            | Self::Matern32(s)
            | Self::Matern52(s)
            | Self::Cosine(s) => vec![
                ("variance", &s.variance, Scalar),
                ("lengthscale", &s.lengthscale, PerFeature),
            ],
            Self::RationalQuadratic { scaled, alpha } => vec![
                ("variance", &scaled.variance, Scalar),
                ("lengthscale", &scaled.lengthscale, PerFeature),
                ("alpha", alpha, Scalar),
            ],
            Self::Linear { variances } => vec![("variances", variances, PerFeature)],
            Self::Polynomial {
                variances,
                offset,
                degree,
            } => vec![
                ("variances", variances, PerFeature),
                ("offset", offset, Scalar),
                ("degree", degree, Scalar),
            ],
            Self::Periodic {
                variance,
                lengthscale,
                period,
            } => vec![
                ("variance", variance, Scalar),
                ("lengthscale", lengthscale, Scalar),
                ("period", period, Scalar),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use covar_core::Error;

    fn rbf(lengthscale: Vec<f64>) -> Formula<f64> {
        Formula::Rbf(Scaled::new(1.0, lengthscale))
    }

    #[test]
    fn test_names_are_distinct() {
        let s = || Scaled::new(1.0f64, 1.0f64);
        let all: Vec<Formula<f64>> = vec![
            Formula::Bias { variance: Param::Scalar(1.0) },
            Formula::White { variance: Param::Scalar(1.0) },
            Formula::Rbf(s()),
            Formula::RationalQuadratic { scaled: s(), alpha: Param::Scalar(1.0) },
            Formula::Linear { variances: Param::Scalar(1.0) },
            Formula::Polynomial {
                variances: Param::Scalar(1.0),
                offset: Param::Scalar(0.0),
                degree: Param::Scalar(2.0),
            },
            Formula::Exponential(s()),
            Formula::Matern12(s()),
            Formula::Matern32(s()),
            Formula::Matern52(s()),
            Formula::Cosine(s()),
            Formula::Periodic {
                variance: Param::Scalar(1.0),
                lengthscale: Param::Scalar(1.0),
                period: Param::Scalar(1.0),
            },
        ];
        let mut names: Vec<_> = all.iter().map(Formula::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 12);
    }

    #[test]
    fn test_per_feature_lengthscale_validation() {
        assert!(rbf(vec![1.0, 2.0]).validate(2).is_ok());
        assert_eq!(
            rbf(vec![1.0, 2.0]).validate(3).unwrap_err(),
            Error::ParameterShapeMismatch {
                kernel: "rbf",
                parameter: "lengthscale",
                expected: 3,
                actual: 2
            }
        );
        let scalar = Formula::Rbf(Scaled::new(1.0f64, 0.5f64));
        assert!(scalar.validate(7).is_ok());
    }

    #[test]
    fn test_scalar_only_parameters() {
        let rq = Formula::RationalQuadratic {
            scaled: Scaled::new(1.0f64, 1.0f64),
            alpha: Param::from(vec![1.0f64, 2.0]),
        };
        assert!(matches!(
            rq.validate(2),
            Err(Error::ParameterShapeMismatch { parameter: "alpha", .. })
        ));

        let periodic = Formula::Periodic {
            variance: Param::Scalar(1.0f64),
            lengthscale: Param::from(vec![1.0f64]),
            period: Param::Scalar(2.0),
        };
        assert!(periodic.validate(3).is_ok());
    }

    #[test]
    fn test_parameter_listing() {
        let poly = Formula::Polynomial {
            variances: Param::from(vec![1.0f64, 1.0]),
            offset: Param::Scalar(1.0),
            degree: Param::Scalar(3.0),
        };
        let names: Vec<_> = poly.parameters().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["variances", "offset", "degree"]);
        assert!(poly.uses_active_dims());

        let white = Formula::White { variance: Param::Scalar(1.0f64) };
        assert!(!white.uses_active_dims());
    }
}
