//! Electrostatics
//!
//! Electric fields and potentials of point charges by superposition, the
//! standard closed-form SI relations (plates, line and plane charges,
//! capacitors), field sampling for arrow and field-line visualization, and the
//! Lorentz-force relations for a charged particle in E and B fields. The
//! force balance on a charged oil droplet covers the Millikan experiment.

pub mod field;
pub mod force_balance;
pub mod motion;
pub mod visualization;

pub use field::{multiple_charges_field, point_charge_field, PointCharge, FIELD_CUTOFF};
pub use force_balance::Droplet;
pub use visualization::{FieldBounds, FieldLineConfig, FieldSample};
