//! Pipe entry rows with dependent selectors

use eframe::egui::{self, Color32, RichText, Ui};
use pipeweight_app::form::{EntryDraft, Field, PipeForm};
use pipeweight_types::{Material, Shape, Thickness};

/// Draw every entry of `form`; edits are written straight back to it
pub fn show_entries(ui: &mut Ui, form: &mut PipeForm) {
    let mut remove = None;

    for index in 0..form.len() {
        let draft = form.entries()[index].clone();

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(format!("Pipe {}", index + 1)).strong());
                if ui.small_button("Remove").clicked() {
                    remove = Some(index);
                }
            });
            entry_row(ui, form, index, &draft);
        });
        ui.add_space(6.0);
    }

    if let Some(index) = remove {
        form.remove_entry(index);
    }
}

fn entry_row(ui: &mut Ui, form: &mut PipeForm, index: usize, draft: &EntryDraft) {
    egui::Grid::new(("entry_grid", index))
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            ui.label(Field::Material.label());
            let mut material = draft.material;
            selector(
                ui,
                ("material", index),
                Field::Material,
                material.map(|m| m.label()),
                |ui| {
                    for m in Material::ALL {
                        ui.selectable_value(&mut material, Some(m), m.label());
                    }
                },
            );
            if material != draft.material {
                form.set_material(index, material);
            }
            ui.end_row();

            if draft.is_visible(Field::Thickness) {
                ui.label(Field::Thickness.label());
                let mut thickness = draft.thickness;
                selector(
                    ui,
                    ("thickness", index),
                    Field::Thickness,
                    thickness.map(|t| t.label()),
                    |ui| {
                        for t in Thickness::ALL {
                            ui.selectable_value(&mut thickness, Some(t), t.label());
                        }
                    },
                );
                if thickness != draft.thickness {
                    form.set_thickness(index, thickness);
                }
                ui.end_row();
            }

            if draft.is_visible(Field::Shape) {
                ui.label(Field::Shape.label());
                let mut shape = draft.shape;
                selector(
                    ui,
                    ("shape", index),
                    Field::Shape,
                    shape.map(|s| s.label()),
                    |ui| {
                        for s in Shape::ALL {
                            ui.selectable_value(&mut shape, Some(s), s.label());
                        }
                    },
                );
                if shape != draft.shape {
                    form.set_shape(index, shape);
                }
                ui.end_row();
            }

            if let (true, Some(shape)) = (draft.is_visible(Field::PipeType), draft.shape) {
                ui.label(Field::PipeType.label());
                let mut size = draft.pipe_type.clone();
                let options = form.size_options(shape).to_vec();
                selector(
                    ui,
                    ("size", index),
                    Field::PipeType,
                    draft.pipe_type.as_deref(),
                    |ui| {
                        for option in &options {
                            ui.selectable_value(&mut size, Some(option.clone()), option);
                        }
                    },
                );
                if size != draft.pipe_type {
                    form.set_pipe_type(index, size);
                }
                ui.end_row();
            }

            if draft.is_visible(Field::Length) {
                ui.label(Field::Length.label());
                let mut length = draft.length.clone();
                let edit = egui::TextEdit::singleline(&mut length)
                    .hint_text(Field::Length.placeholder())
                    .desired_width(160.0);
                if ui.add(edit).changed() {
                    form.set_length(index, length);
                }
                ui.end_row();
            }
        });
}

fn selector(
    ui: &mut Ui,
    id: impl std::hash::Hash,
    field: Field,
    selected: Option<&str>,
    options: impl FnOnce(&mut Ui),
) {
    let text = match selected {
        Some(label) => RichText::new(label),
        None => RichText::new(field.placeholder()).color(Color32::GRAY),
    };
    egui::ComboBox::from_id_salt(id)
        .selected_text(text)
        .width(200.0)
        .show_ui(ui, options);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeweight_domain::model::builtin_table;

    fn render(form: &mut PipeForm) {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| show_entries(ui, form));
        });
    }

    #[test]
    fn test_rendering_leaves_form_untouched() {
        let mut form = PipeForm::new(&builtin_table());
        form.set_material(0, Some(Material::Ss));
        form.set_thickness(0, Some(Thickness::Mm1));
        form.set_shape(0, Some(Shape::Square));
        form.set_pipe_type(0, Some("1x1-inch".to_string()));
        form.set_length(0, "4");
        form.add_entry();
        let revision = form.revision();

        render(&mut form);

        assert_eq!(form.revision(), revision);
        assert_eq!(form.len(), 2);
        assert_eq!(form.entries()[0].pipe_type.as_deref(), Some("1x1-inch"));
    }

    #[test]
    fn test_renders_empty_form() {
        let mut form = PipeForm::new(&builtin_table());
        form.remove_entry(0);
        render(&mut form);
        assert!(form.is_empty());
    }
}
