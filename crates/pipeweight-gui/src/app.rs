//! Main application structure

use eframe::egui::{self, Color32, RichText};
use pipeweight_app::client::{CalculationClient, ClientError, RequestSequence};
use pipeweight_app::config::Config;
use pipeweight_app::export::{export_totals_pdf, DEFAULT_PDF_NAME};
use pipeweight_app::form::{DisplayedTotals, PipeForm, Submission};
use pipeweight_app::repository::load_spec_table;
use pipeweight_domain::model::builtin_table;
use pipeweight_types::CalculationResponse;
use tokio::runtime::Runtime;

use crate::form_panel;

type Outcome = Result<CalculationResponse, ClientError>;

/// Main application state
pub struct PipeWeightApp {
    config: Config,
    form: PipeForm,
    totals: DisplayedTotals,
    client: CalculationClient,
    requests: RequestSequence<Outcome>,
    /// Form revision the current totals were requested for
    submitted_revision: Option<u64>,
    dark_mode: bool,
    /// Result of the last export
    status: Option<Result<String, String>>,
    // Keeps the request tasks alive
    _runtime: Runtime,
}

impl PipeWeightApp {
    pub fn new(cc: &eframe::CreationContext<'_>, runtime: Runtime) -> Self {
        let config = Config::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Config::default()
        });

        // Size choices come from the same table the endpoint serves
        let table = load_spec_table(&config, None).unwrap_or_else(|e| {
            tracing::warn!("Failed to load spec table, using built-in: {}", e);
            builtin_table()
        });

        let dark_mode = cc.egui_ctx.style().visuals.dark_mode;

        Self {
            form: PipeForm::new(&table),
            totals: DisplayedTotals::default(),
            client: CalculationClient::from_config(&config),
            requests: RequestSequence::new(runtime.handle().clone()),
            submitted_revision: None,
            dark_mode,
            status: None,
            config,
            _runtime: runtime,
        }
    }

    /// Send a new request whenever the entry list changed
    fn sync_totals(&mut self, ctx: &egui::Context) {
        if let Some(outcome) = self.requests.try_latest() {
            self.totals.apply(outcome);
        }

        let revision = self.form.revision();
        if self.submitted_revision != Some(revision) {
            self.submitted_revision = Some(revision);
            match self.form.plan_submission() {
                Submission::Reset => {
                    self.requests.cancel();
                    self.totals.reset();
                }
                Submission::Send(entries) => {
                    let client = self.client.clone();
                    self.requests
                        .submit(async move { client.calculate(entries).await });
                }
            }
        }

        if self.requests.is_pending() {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }
    }

    fn render_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Pipe Selection");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let label = if self.dark_mode { "Light mode" } else { "Dark mode" };
                if ui.button(label).clicked() {
                    self.dark_mode = !self.dark_mode;
                }
            });
        });
    }

    fn render_actions(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Add Pipe").clicked() {
                self.form.add_entry();
            }
            if ui.button("Clear All").clicked() {
                self.form.clear();
            }
        });
    }

    fn render_totals(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.label(
                RichText::new(format!("Total Weight: {} kg", self.totals.total_weight))
                    .size(16.0),
            );
            ui.label(
                RichText::new(format!(
                    "Estimated Price: {} {}",
                    self.config.currency_label, self.totals.total_price
                ))
                .size(16.0),
            );
            if self.requests.is_pending() {
                ui.spinner();
            }
            if let Some(ref error) = self.totals.error {
                ui.label(RichText::new(error).color(Color32::RED));
            }
        });

        ui.add_space(8.0);
        if ui.button("Download PDF").clicked() {
            self.export_pdf();
        }

        match &self.status {
            Some(Ok(msg)) => {
                ui.label(RichText::new(msg).color(Color32::GREEN));
            }
            Some(Err(msg)) => {
                ui.label(RichText::new(msg).color(Color32::RED));
            }
            None => {}
        }
    }

    fn export_pdf(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(DEFAULT_PDF_NAME)
            .add_filter("PDF", &["pdf"])
            .save_file()
        else {
            return;
        };

        self.status = Some(
            export_totals_pdf(
                &path,
                &self.totals.total_weight,
                &self.totals.total_price,
                &self.config.currency_label,
            )
            .map(|()| format!("Saved {}", path.display()))
            .map_err(|e| format!("PDF export failed: {}", e)),
        );
    }
}

impl eframe::App for PipeWeightApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(if self.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });

        self.sync_totals(ctx);

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(4.0);
            self.render_header(ui);
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("totals").show(ctx, |ui| {
            ui.add_space(6.0);
            self.render_totals(ui);
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                form_panel::show_entries(ui, &mut self.form);
                self.render_actions(ui);
            });
        });
    }
}
