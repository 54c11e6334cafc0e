use crate::{
    CorrelationView, DashboardResult, Dataset, DatasetMetadata, Distribution, Error,
    ImputationComparison, MissingOverview, MyStyle, Notification, Overview, PairGrid, Page,
    ScatterChart, categorical_columns, color_columns, numeric_columns, render_sections,
    show_outcome,
};

use egui::{
    CentralPanel, Color32, ComboBox, Context, Direction, FontId, Frame, Grid, Hyperlink, Layout,
    RichText, ScrollArea, SidePanel, Stroke, TopBottomPanel, Ui, ViewportCommand, menu,
    style::Visuals, warn_if_debug_build, widgets,
};
use std::sync::Arc;
use tokio::{
    runtime::Runtime,
    sync::oneshot::{self, Receiver, error::TryRecvError},
};
use tracing::error;

/// Type alias for a Result with a freshly loaded `Dataset`.
pub type DatasetResult = DashboardResult<Dataset>;
/// Type alias for a boxed, dynamically dispatched Future that returns a `DatasetResult`.
pub type DataFuture = Box<dyn Future<Output = DatasetResult> + Unpin + Send + 'static>;

/// Tabs of the Missing Values page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingTab {
    #[default]
    Overview,
    Imputation,
}

/// Tabs of the Scatter Plots page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScatterTab {
    #[default]
    Interactive,
    PairGrid,
}

/// Current dropdown and tab choices. `None` means "use the page default".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selections {
    pub category: Option<String>,
    pub scatter_x: Option<String>,
    pub scatter_y: Option<String>,
    pub color: Option<String>,
    pub correlation_target: Option<String>,
    pub missing_tab: MissingTab,
    pub scatter_tab: ScatterTab,
}

impl Selections {
    /// Fills an unset correlation target with the one the view would pick,
    /// so the dropdown shows what the page ranks against.
    pub fn seed_correlation_target(&mut self, numeric: &[String]) {
        if self.correlation_target.is_none() && !numeric.is_empty() {
            self.correlation_target = Some(CorrelationView::default_target(numeric).to_string());
        }
    }
}

/// The main application struct for Puck View.
pub struct DashboardApp {
    /// Loaded snapshot shared read-only by every page.
    pub dataset: Arc<Dataset>,
    /// Shape and schema shown in the side panel.
    pub metadata: DatasetMetadata,
    pub page: Page,
    pub selections: Selections,
    /// Optional Notification window for displaying errors.
    pub notification: Option<Box<dyn Notification>>,

    /// Tokio runtime for reloading the sources.
    runtime: Runtime,
    /// Channel for receiving the result of an asynchronous reload.
    pipe: Option<Receiver<DatasetResult>>,
    /// Vector of active asynchronous tasks.
    tasks: Vec<tokio::task::JoinHandle<()>>,
}

impl DashboardApp {
    /// Creates the app around the dataset loaded at startup.
    pub fn new(cc: &eframe::CreationContext<'_>, dataset: Dataset, runtime: Runtime) -> Self {
        cc.egui_ctx.set_style_init(Visuals::dark());

        let metadata = DatasetMetadata::from_dataset(&dataset);

        Self {
            dataset: Arc::new(dataset),
            metadata,
            page: Page::default(),
            selections: Selections::default(),
            notification: None,
            runtime,
            pipe: None,
            tasks: Vec::new(),
        }
    }

    /// Checks if a Notification is active and displays it.
    fn check_notification(&mut self, ctx: &Context) {
        if let Some(notification) = &mut self.notification
            && !notification.show(ctx)
        {
            self.notification = None;
        }
    }

    /// Polls a pending reload. Returns `true` while it is still running.
    ///
    /// A failed reload keeps the current snapshot and shows an Error notification.
    fn check_data_pending(&mut self) -> bool {
        let Some(mut output) = self.pipe.take() else {
            return false;
        };

        match output.try_recv() {
            Ok(Ok(dataset)) => {
                self.metadata = DatasetMetadata::from_dataset(&dataset);
                self.dataset = Arc::new(dataset);
                // Columns may have changed; fall back to page defaults.
                self.selections = Selections {
                    missing_tab: self.selections.missing_tab,
                    scatter_tab: self.selections.scatter_tab,
                    ..Selections::default()
                };
                false
            }
            Ok(Err(err)) => {
                error!("Reload failed: {}", err);
                self.notification = Some(Box::new(Error {
                    message: err.to_string(),
                }));
                false
            }
            Err(TryRecvError::Empty) => {
                self.pipe = Some(output);
                true
            }
            Err(TryRecvError::Closed) => {
                let err_msg = "Reload terminated without response.".to_string();
                error!("{}", err_msg);
                self.notification = Some(Box::new(Error { message: err_msg }));
                false
            }
        }
    }

    /// Runs a `DataFuture` on the app runtime and forwards its result through `pipe`.
    fn run_data_future(&mut self, future: DataFuture, ctx: &Context) {
        self.tasks.retain(|task| !task.is_finished());

        let (tx, rx) = oneshot::channel::<DatasetResult>();
        self.pipe = Some(rx);

        let ctx_clone = ctx.clone();

        let handle = self.runtime.spawn(async move {
            let data = future.await;
            if tx.send(data).is_err() {
                error!("Receiver dropped before data could be sent.");
            }
            ctx_clone.request_repaint();
        });

        self.tasks.push(handle);
    }

    /// Re-reads both sources with the current configuration.
    fn reload(&mut self, ctx: &Context) {
        let config = self.dataset.config.as_ref().clone();
        tracing::info!("Reloading sources: {config:?}");
        let future = Dataset::load(config);
        self.run_data_future(Box::new(Box::pin(future)), ctx);
    }

    fn render_menu(&mut self, ui: &mut Ui, ctx: &Context) {
        menu::bar(ui, |ui| {
            ui.horizontal(|ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Reload").clicked() {
                        self.reload(ctx);
                        ui.close_menu();
                    }

                    ui.menu_button("About", render_about);

                    if ui.button("Quit").clicked() {
                        ui.ctx().send_viewport_cmd(ViewportCommand::Close);
                    }
                });

                // Add spacing to align theme switch to the right.
                let delta = ui.available_width() - 15.0;
                if delta > 0.0 {
                    ui.add_space(delta);
                    widgets::global_theme_preference_switch(ui);
                }
            });
        });
    }

    fn render_side_panel(&mut self, ui: &mut Ui) {
        ScrollArea::vertical().show(ui, |ui| {
            ui.heading("Navigation");
            for page in Page::ALL {
                ui.radio_value(&mut self.page, page, page.title());
            }

            ui.separator();

            ui.collapsing("Metadata", |ui| {
                self.metadata.render_metadata(ui);
            });

            ui.collapsing("Schema", |ui| {
                self.metadata.render_schema(ui);
            });
        });
    }

    /// Draws the selected page: its widgets, then its explanatory sections.
    fn render_page(&mut self, ui: &mut Ui) {
        let dataset = Arc::clone(&self.dataset);
        let df = dataset.merged.as_ref();

        ui.heading(self.page.title());
        ui.add_space(6.0);

        match self.page {
            Page::About | Page::WrappingUp => {}
            Page::Overview => {
                show_outcome(ui, Overview::build(df), |ui, overview| {
                    overview.render(ui, &dataset)
                });
            }
            Page::ClassImbalance => {
                let options = categorical_columns(df);
                column_combo(
                    ui,
                    "Select Category:",
                    &mut self.selections.category,
                    &options,
                    false,
                );
                let outcome = Distribution::build(df, self.selections.category.as_deref());
                show_outcome(ui, outcome, |ui, distribution| distribution.render(ui));
            }
            Page::MissingValues => {
                let tab = &mut self.selections.missing_tab;
                ui.horizontal(|ui| {
                    ui.selectable_value(tab, MissingTab::Overview, "Missing Values Overview");
                    ui.selectable_value(tab, MissingTab::Imputation, "Imputation");
                });
                ui.separator();

                match self.selections.missing_tab {
                    MissingTab::Overview => {
                        show_outcome(ui, MissingOverview::build(df), |ui, overview| {
                            overview.render(ui)
                        });
                    }
                    MissingTab::Imputation => {
                        show_outcome(ui, ImputationComparison::build(df), |ui, comparison| {
                            comparison.render(ui)
                        });
                    }
                }
            }
            Page::Correlation => {
                let options = numeric_columns(df);
                self.selections.seed_correlation_target(&options);
                column_combo(
                    ui,
                    "Rank against:",
                    &mut self.selections.correlation_target,
                    &options,
                    false,
                );
                let outcome =
                    CorrelationView::build(df, self.selections.correlation_target.as_deref());
                show_outcome(ui, outcome, |ui, view| view.render(ui));
            }
            Page::Scatter => {
                let tab = &mut self.selections.scatter_tab;
                ui.horizontal(|ui| {
                    ui.selectable_value(tab, ScatterTab::Interactive, "Interactive Scatter Plot");
                    ui.selectable_value(tab, ScatterTab::PairGrid, "Pairplot");
                });
                ui.separator();

                match self.selections.scatter_tab {
                    ScatterTab::Interactive => self.render_scatter(ui, df),
                    ScatterTab::PairGrid => {
                        show_outcome(ui, PairGrid::build(df), |ui, grid| grid.render(ui));
                    }
                }
            }
        }

        ui.add_space(10.0);
        render_sections(ui, self.page);
    }

    fn render_scatter(&mut self, ui: &mut Ui, df: &polars::prelude::DataFrame) {
        let numeric = numeric_columns(df);
        let colors = color_columns(df);
        let selections = &mut self.selections;

        ui.horizontal(|ui| {
            column_combo(ui, "Select X-axis:", &mut selections.scatter_x, &numeric, false);
            // Second numeric column by default, as the scatter itself does.
            let y_default = numeric.get(1).or(numeric.first());
            if selections.scatter_y.is_none() {
                selections.scatter_y = y_default.cloned();
            }
            column_combo(ui, "Select Y-axis:", &mut selections.scatter_y, &numeric, false);
            column_combo(ui, "Color by (optional):", &mut selections.color, &colors, true);
        });

        let outcome = ScatterChart::build(
            df,
            selections.scatter_x.as_deref(),
            selections.scatter_y.as_deref(),
            selections.color.as_deref(),
        );
        show_outcome(ui, outcome, |ui, chart| chart.render(ui));
    }
}

/// Dropdown constrained to `options`.
///
/// With `optional`, a "None" entry clears the selection. Otherwise an unset
/// selection displays the first option; pages whose default differs seed the
/// selection before calling.
fn column_combo(
    ui: &mut Ui,
    label: &str,
    selection: &mut Option<String>,
    options: &[String],
    optional: bool,
) {
    let selected_text = match (selection.as_deref(), optional) {
        (Some(name), _) => name.to_string(),
        (None, true) => "None".to_string(),
        (None, false) => options.first().cloned().unwrap_or_default(),
    };

    ComboBox::from_label(label)
        .selected_text(selected_text)
        .show_ui(ui, |ui| {
            if optional {
                ui.selectable_value(selection, None, "None");
            }
            for option in options {
                ui.selectable_value(selection, Some(option.clone()), option);
            }
        });
}

/// Application information shown under File > About.
fn render_about(ui: &mut Ui) {
    Frame::default()
        .stroke(Stroke::new(1.0, Color32::GRAY))
        .outer_margin(2.0)
        .inner_margin(10.0)
        .show(ui, |ui| {
            let version = env!("CARGO_PKG_VERSION");
            let description = env!("CARGO_PKG_DESCRIPTION");

            Grid::new("about_grid")
                .num_columns(1)
                .spacing([10.0, 4.0])
                .show(ui, |ui| {
                    ui.with_layout(
                        Layout::centered_and_justified(Direction::LeftToRight),
                        |ui| {
                            ui.label(RichText::new("Puck View").font(FontId::proportional(30.0)));
                        },
                    );
                    ui.end_row();

                    ui.with_layout(
                        Layout::centered_and_justified(Direction::LeftToRight),
                        |ui| {
                            ui.label(format!("Version: {version}"));
                        },
                    );
                    ui.end_row();

                    ui.label(RichText::new(description).font(FontId::proportional(18.0)));
                    ui.end_row();
                    ui.end_row();

                    for (prefix, name, url) in [
                        ("Powered by ", "Polars", "https://github.com/pola-rs/polars"),
                        ("Built with ", "egui", "https://github.com/emilk/egui"),
                        ("Charts by ", "egui_plot", "https://github.com/emilk/egui_plot"),
                        ("Data from ", "nhl.com", "https://www.nhl.com/stats"),
                    ] {
                        ui.horizontal(|ui| {
                            ui.label(prefix);
                            ui.add(Hyperlink::from_label_and_url(name, url))
                                .on_hover_text(url);
                        });
                        ui.end_row();
                    }
                });
        });
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.check_notification(ctx);

        // Static layout:
        //
        //  | menu_bar          widgets |
        //  -----------------------------
        //  |            |              |
        //  | Navigation |     page     |
        //  | Metadata   |              |
        //  |            |              |
        //  -----------------------------
        //  | source files              |

        TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.render_menu(ui, ctx);
        });

        SidePanel::left("side_panel")
            .resizable(true)
            .show(ctx, |ui| {
                self.render_side_panel(ui);
            });

        TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
            let config = &self.dataset.config;
            ui.horizontal(|ui| {
                ui.label(format!(
                    "Season: {}  |  Bio: {}",
                    config.season_path.display(),
                    config.bio_path.display()
                ));
            });
        });

        // CentralPanel must be added after all other panels in your egui layout!
        CentralPanel::default().show(ctx, |ui| {
            warn_if_debug_build(ui);

            // Disable interaction while a reload is in progress.
            if self.check_data_pending() {
                ui.disable();
                ui.spinner();
            }

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.render_page(ui);
                });
        });
    }
}
