//! Named scalar measurements handed to the progress/explanation layer

/// A named scalar derived from simulation state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub name: &'static str,
    pub value: f64,
}

impl Measurement {
    pub fn new(name: &'static str, value: f64) -> Self {
        Self { name, value }
    }
}

/// Ordered collection of measurements, looked up by name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Measurements(Vec<Measurement>);

impl Measurements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a measurement
    pub fn with(mut self, name: &'static str, value: f64) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &'static str, value: f64) {
        match self.0.iter_mut().find(|m| m.name == name) {
            Some(existing) => existing.value = value,
            None => self.0.push(Measurement::new(name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.iter().find(|m| m.name == name).map(|m| m.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Measurement> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Extend<Measurement> for Measurements {
    fn extend<T: IntoIterator<Item = Measurement>>(&mut self, iter: T) {
        for m in iter {
            self.insert(m.name, m.value);
        }
    }
}
