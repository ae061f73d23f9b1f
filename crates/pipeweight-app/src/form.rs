//! Pipe entry form state
//!
//! Each entry is filled in five stages: material, thickness, shape, size and
//! length. A selector is only shown once its predecessor holds a value. The
//! form keeps a revision counter so a front end can tell when the entry list
//! changed and a new calculation should be submitted.

use std::collections::BTreeMap;

use pipeweight_domain::model::SpecTable;
use pipeweight_types::{CalculationResponse, Length, Material, PipeEntry, Shape, Thickness};

/// The one message shown for any failed calculation
pub const CALCULATION_ERROR: &str = "Error calculating weight and price";

/// Form fields in reveal order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Material,
    Thickness,
    Shape,
    PipeType,
    Length,
}

impl Field {
    pub const ORDER: [Field; 5] = [
        Field::Material,
        Field::Thickness,
        Field::Shape,
        Field::PipeType,
        Field::Length,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Material => "Material (SS/MS)",
            Field::Thickness => "Thickness",
            Field::Shape => "Shape (Round/Square)",
            Field::PipeType => "Pipe Size",
            Field::Length => "Length (in meters)",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Field::Material => "Select Material",
            Field::Thickness => "Select Thickness",
            Field::Shape => "Select Shape",
            Field::PipeType => "Select Pipe Size",
            Field::Length => "Enter length in meters",
        }
    }
}

/// One entry as it is being edited
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryDraft {
    pub material: Option<Material>,
    pub thickness: Option<Thickness>,
    pub shape: Option<Shape>,
    pub pipe_type: Option<String>,
    /// Raw text as typed
    pub length: String,
}

impl EntryDraft {
    pub fn has_value(&self, field: Field) -> bool {
        match field {
            Field::Material => self.material.is_some(),
            Field::Thickness => self.thickness.is_some(),
            Field::Shape => self.shape.is_some(),
            Field::PipeType => self.pipe_type.as_deref().is_some_and(|s| !s.is_empty()),
            Field::Length => !self.length.is_empty(),
        }
    }

    /// A selector is visible once the previous one holds a value
    pub fn is_visible(&self, field: Field) -> bool {
        match field {
            Field::Material => true,
            Field::Thickness => self.has_value(Field::Material),
            Field::Shape => self.has_value(Field::Thickness),
            Field::PipeType => self.has_value(Field::Shape),
            Field::Length => self.has_value(Field::PipeType),
        }
    }

    /// First field still waiting for a value, `None` when complete
    pub fn next_field(&self) -> Option<Field> {
        Field::ORDER.into_iter().find(|f| !self.has_value(*f))
    }

    pub fn is_complete(&self) -> bool {
        self.next_field().is_none()
    }

    /// The wire entry, only when all five fields are filled in
    pub fn to_entry(&self) -> Option<PipeEntry> {
        if !self.is_complete() {
            return None;
        }
        Some(PipeEntry {
            material: self.material?.code().to_string(),
            thickness: self.thickness?.code().to_string(),
            shape: self.shape?.code().to_string(),
            pipe_type: self.pipe_type.clone()?,
            length: Length::parse(&self.length),
        })
    }
}

/// What a front end should do after the entry list changed
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// No complete entries: show zero totals, send nothing
    Reset,
    /// Send these entries
    Send(Vec<PipeEntry>),
}

/// The multi-entry pipe form
#[derive(Debug, Clone)]
pub struct PipeForm {
    entries: Vec<EntryDraft>,
    sizes: BTreeMap<Shape, Vec<String>>,
    revision: u64,
}

impl PipeForm {
    /// Size choices are taken from the spec table
    pub fn new(table: &SpecTable) -> Self {
        let sizes = Shape::ALL
            .into_iter()
            .map(|shape| {
                let offered = table
                    .sizes_for(shape)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                (shape, offered)
            })
            .collect();
        Self {
            entries: vec![EntryDraft::default()],
            sizes,
            revision: 0,
        }
    }

    pub fn entries(&self) -> &[EntryDraft] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Incremented on every edit
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn size_options(&self, shape: Shape) -> &[String] {
        self.sizes.get(&shape).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn add_entry(&mut self) {
        self.entries.push(EntryDraft::default());
        self.touch();
    }

    pub fn remove_entry(&mut self, index: usize) {
        if index < self.entries.len() {
            self.entries.remove(index);
            self.touch();
        }
    }

    /// Back to a single empty entry
    pub fn clear(&mut self) {
        self.entries = vec![EntryDraft::default()];
        self.touch();
    }

    pub fn set_material(&mut self, index: usize, material: Option<Material>) {
        self.edit(index, |draft| draft.material = material);
    }

    pub fn set_thickness(&mut self, index: usize, thickness: Option<Thickness>) {
        self.edit(index, |draft| draft.thickness = thickness);
    }

    /// Changing shape drops a size the new shape does not offer
    pub fn set_shape(&mut self, index: usize, shape: Option<Shape>) {
        let offered: Vec<String> = shape
            .map(|s| self.size_options(s).to_vec())
            .unwrap_or_default();
        self.edit(index, |draft| {
            draft.shape = shape;
            if let Some(size) = &draft.pipe_type {
                if shape.is_some() && !offered.contains(size) {
                    draft.pipe_type = None;
                }
            }
        });
    }

    pub fn set_pipe_type(&mut self, index: usize, pipe_type: Option<String>) {
        self.edit(index, |draft| draft.pipe_type = pipe_type);
    }

    pub fn set_length(&mut self, index: usize, length: impl Into<String>) {
        let length = length.into();
        self.edit(index, |draft| draft.length = length);
    }

    /// Entries with all five fields filled in
    pub fn valid_entries(&self) -> Vec<PipeEntry> {
        self.entries.iter().filter_map(EntryDraft::to_entry).collect()
    }

    pub fn plan_submission(&self) -> Submission {
        let valid = self.valid_entries();
        if valid.is_empty() {
            Submission::Reset
        } else {
            Submission::Send(valid)
        }
    }

    fn edit<F: FnOnce(&mut EntryDraft)>(&mut self, index: usize, f: F) {
        if let Some(draft) = self.entries.get_mut(index) {
            let before = draft.clone();
            f(draft);
            if *draft != before {
                self.touch();
            }
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}

/// Totals as displayed next to the form
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayedTotals {
    pub total_weight: String,
    pub total_price: String,
    pub error: Option<String>,
}

impl Default for DisplayedTotals {
    fn default() -> Self {
        Self {
            total_weight: "0".to_string(),
            total_price: "0".to_string(),
            error: None,
        }
    }
}

impl DisplayedTotals {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Apply a calculation outcome. Any failure shows the generic message
    /// and zeroes the totals.
    pub fn apply<E: std::fmt::Display>(&mut self, outcome: Result<CalculationResponse, E>) {
        match outcome {
            Ok(response) => {
                self.total_weight = response.total_weight;
                self.total_price = response.total_price;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!("calculation failed: {}", e);
                let zero = CalculationResponse::zero();
                self.total_weight = zero.total_weight;
                self.total_price = zero.total_price;
                self.error = Some(CALCULATION_ERROR.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeweight_domain::model::builtin_table;

    fn form() -> PipeForm {
        PipeForm::new(&builtin_table())
    }

    #[test]
    fn test_starts_with_one_empty_entry() {
        let form = form();
        assert_eq!(form.len(), 1);
        assert_eq!(form.entries()[0].next_field(), Some(Field::Material));
        assert_eq!(form.plan_submission(), Submission::Reset);
    }

    #[test]
    fn test_stages_reveal_in_order() {
        let mut form = form();
        let visible = |f: &PipeForm| {
            Field::ORDER
                .into_iter()
                .filter(|field| f.entries()[0].is_visible(*field))
                .count()
        };
        assert_eq!(visible(&form), 1);
        form.set_material(0, Some(Material::Ss));
        assert_eq!(visible(&form), 2);
        form.set_thickness(0, Some(Thickness::Mm1));
        assert_eq!(visible(&form), 3);
        form.set_shape(0, Some(Shape::Round));
        assert_eq!(visible(&form), 4);
        form.set_pipe_type(0, Some("1-inch".to_string()));
        assert_eq!(visible(&form), 5);
        assert_eq!(form.entries()[0].next_field(), Some(Field::Length));
        form.set_length(0, "10");
        assert!(form.entries()[0].is_complete());
    }

    #[test]
    fn test_only_complete_entries_are_sent() {
        let mut form = form();
        form.set_material(0, Some(Material::Ss));
        form.set_thickness(0, Some(Thickness::Mm1));
        form.set_shape(0, Some(Shape::Round));
        form.set_pipe_type(0, Some("1-inch".to_string()));
        form.set_length(0, "10");
        form.add_entry();
        form.set_material(1, Some(Material::Ms));

        match form.plan_submission() {
            Submission::Send(entries) => {
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].pipe_type, "1-inch");
                assert_eq!(entries[0].length.meters(), 10.0);
            }
            Submission::Reset => panic!("expected a submission"),
        }
    }

    #[test]
    fn test_shape_change_drops_foreign_size() {
        let mut form = form();
        form.set_shape(0, Some(Shape::Square));
        form.set_pipe_type(0, Some("1x1-inch".to_string()));
        form.set_shape(0, Some(Shape::Round));
        assert_eq!(form.entries()[0].pipe_type, None);

        form.set_pipe_type(0, Some("1-inch".to_string()));
        form.set_shape(0, Some(Shape::Round));
        assert_eq!(form.entries()[0].pipe_type.as_deref(), Some("1-inch"));
    }

    #[test]
    fn test_revision_tracks_edits() {
        let mut form = form();
        let start = form.revision();
        form.set_material(0, Some(Material::Ms));
        assert_eq!(form.revision(), start + 1);
        // same value again is not an edit
        form.set_material(0, Some(Material::Ms));
        assert_eq!(form.revision(), start + 1);
        form.add_entry();
        form.remove_entry(1);
        assert_eq!(form.revision(), start + 3);
        form.remove_entry(42);
        assert_eq!(form.revision(), start + 3);
    }

    #[test]
    fn test_last_entry_can_be_removed() {
        let mut form = form();
        form.remove_entry(0);
        assert!(form.is_empty());
        assert_eq!(form.plan_submission(), Submission::Reset);
        form.add_entry();
        assert_eq!(form.len(), 1);
    }

    #[test]
    fn test_clear_resets_to_single_entry() {
        let mut form = form();
        form.add_entry();
        form.set_material(1, Some(Material::Ss));
        form.clear();
        assert_eq!(form.len(), 1);
        assert_eq!(form.entries()[0], EntryDraft::default());
    }

    #[test]
    fn test_size_options_follow_table() {
        let form = form();
        assert_eq!(form.size_options(Shape::Round), ["1-inch", "1/2-inch"]);
        assert_eq!(form.size_options(Shape::Square).len(), 3);
    }

    #[test]
    fn test_failure_resets_totals() {
        let mut totals = DisplayedTotals::default();
        totals.apply::<String>(Ok(CalculationResponse {
            total_weight: "3.00".to_string(),
            total_price: "0.45".to_string(),
        }));
        assert_eq!(totals.total_weight, "3.00");
        assert!(totals.error.is_none());

        totals.apply::<String>(Err("connection refused".to_string()));
        assert_eq!(totals.total_weight, "0");
        assert_eq!(totals.total_price, "0");
        assert_eq!(totals.error.as_deref(), Some(CALCULATION_ERROR));
    }
}
