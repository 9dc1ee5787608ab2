use serde::{Deserialize, Serialize};

/// One row of the bill of materials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialLine {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    /// SEK, already rounded up.
    pub price: f64,
}

impl MaterialLine {
    pub fn new(name: &str, quantity: f64, unit: &str, price: f64) -> Self {
        Self {
            name: name.to_string(),
            quantity,
            unit: unit.to_string(),
            price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildStep {
    pub step: u32,
    pub title: &'static str,
    pub description: &'static str,
}

/// Regulatory approval level implied by the footprint area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PermitTier {
    #[serde(rename = "Inget bygglov krävs")]
    NoPermit,
    #[serde(rename = "Kräver bygganmälan")]
    Notification,
    #[serde(rename = "Kräver bygglov")]
    FullPermit,
}

/// Materials, steps, cost and permit for one project.
///
/// Only [`EstimationResult::new`] builds this, so `estimated_cost` is
/// always the sum of the material prices.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationResult {
    materials: Vec<MaterialLine>,
    build_steps: Vec<BuildStep>,
    estimated_cost: f64,
    building_permit: PermitTier,
}

impl EstimationResult {
    pub fn new(
        materials: Vec<MaterialLine>,
        build_steps: Vec<BuildStep>,
        building_permit: PermitTier,
    ) -> Self {
        let estimated_cost = materials.iter().fold(0.0, |total, m| total + m.price);
        Self {
            materials,
            build_steps,
            estimated_cost,
            building_permit,
        }
    }

    pub fn materials(&self) -> &[MaterialLine] {
        &self.materials
    }

    pub fn build_steps(&self) -> &[BuildStep] {
        &self.build_steps
    }

    pub fn estimated_cost(&self) -> f64 {
        self.estimated_cost
    }

    pub fn building_permit(&self) -> PermitTier {
        self.building_permit
    }
}
