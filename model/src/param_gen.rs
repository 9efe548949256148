use rand::{Rng, distr::StandardUniform};
use rand_distr::{Distribution, Normal, NormalError, Uniform, uniform::Error as UniformError};

/// A parameter generator that follows a certain probabilistic distribution.
pub struct RandParamGen<D: Distribution<f32>> {
    distribution: D,
}

impl<D: Distribution<f32>> RandParamGen<D> {
    /// Creates a new `RandParamGen` parameter generator.
    ///
    /// # Arguments
    /// * `distribution` - The distribution to sample the random numbers from.
    pub fn new(distribution: D) -> Self {
        Self { distribution }
    }

    /// Samples `n` parameters.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `n` - The amount of parameters to generate.
    ///
    /// # Returns
    /// The sampled parameters, in sampling order.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Vec<f32> {
        (0..n).map(|_| self.distribution.sample(rng)).collect()
    }
}

impl RandParamGen<StandardUniform> {
    /// Creates a new `RandParamGen` parameter generator that samples from `[0, 1)`.
    pub fn standard() -> Self {
        Self::new(StandardUniform)
    }
}

impl RandParamGen<Uniform<f32>> {
    /// Creates a new `RandParamGen` parameter generator that always yields the same value.
    ///
    /// # Arguments
    /// * `value` - The value to always generate.
    pub fn constant(value: f32) -> Result<Self, UniformError> {
        Self::uniform_inclusive(value, value)
    }

    /// Creates a new `RandParamGen` parameter generator with a uniform distribution.
    ///
    /// # Arguments
    /// * `low` - The inclusive lower limit.
    /// * `high` - The exclusive upper limit.
    ///
    /// # Returns
    /// An error if the range is invalid (low >= high).
    pub fn uniform(low: f32, high: f32) -> Result<Self, UniformError> {
        Ok(Self::new(Uniform::new(low, high)?))
    }

    /// Creates a new `RandParamGen` parameter generator with an inclusive uniform distribution.
    ///
    /// # Arguments
    /// * `low` - The inclusive lower limit.
    /// * `high` - The inclusive upper limit.
    ///
    /// # Returns
    /// An error if the range is invalid (low > high).
    pub fn uniform_inclusive(low: f32, high: f32) -> Result<Self, UniformError> {
        Ok(Self::new(Uniform::new_inclusive(low, high)?))
    }
}

impl RandParamGen<Normal<f32>> {
    /// Creates a new `RandParamGen` parameter generator with a normal distribution.
    ///
    /// # Returns
    /// An error if `std_dev` is not finite (Nan or infinite).
    pub fn normal(mean: f32, std_dev: f32) -> Result<Self, NormalError> {
        Ok(Self::new(Normal::new(mean, std_dev)?))
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn standard_samples_stay_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(7);
        let params = RandParamGen::standard().sample(&mut rng, 256);

        assert_eq!(params.len(), 256);
        assert!(params.iter().all(|p| (0.0..1.0).contains(p)));
    }

    #[test]
    fn constant_always_yields_the_value() {
        let mut rng = StdRng::seed_from_u64(7);
        let params = RandParamGen::constant(0.5).unwrap().sample(&mut rng, 10);
        assert_eq!(params, vec![0.5; 10]);
    }

    #[test]
    fn uniform_rejects_inverted_range() {
        assert!(RandParamGen::uniform(1.0, -1.0).is_err());
    }

    #[test]
    fn normal_rejects_non_finite_std_dev() {
        assert!(RandParamGen::normal(0.0, f32::NAN).is_err());
    }

    #[test]
    fn same_seed_same_params() {
        let param_gen = RandParamGen::uniform(-1.0, 1.0).unwrap();
        let a = param_gen.sample(&mut StdRng::seed_from_u64(42), 16);
        let b = param_gen.sample(&mut StdRng::seed_from_u64(42), 16);
        assert_eq!(a, b);
    }
}
