//! Application shell: routing, session handling and chrome.

use tracing::info;

use cmdb_client::{ApiClient, Config};

use crate::net::Net;
use crate::pages::{
    assets::AssetsPage, ci_types::CiTypesPage, graph::GraphPage, lifecycles::LifecyclesPage,
    login::LoginPage, relationships::RelationshipsPage, PageEvent,
};
use crate::state::{AuthStore, PrefsStore, Theme, Toasts};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Assets,
    CiTypes,
    Relationships,
    Lifecycles,
    Graph,
}

impl Page {
    const ALL: [Page; 5] = [
        Page::Assets,
        Page::CiTypes,
        Page::Relationships,
        Page::Lifecycles,
        Page::Graph,
    ];

    fn label(&self) -> &'static str {
        match self {
            Page::Assets => "Assets",
            Page::CiTypes => "CI Types",
            Page::Relationships => "Relationships",
            Page::Lifecycles => "Lifecycles",
            Page::Graph => "Graph",
        }
    }
}

pub struct CmdbApp {
    net: Net,
    auth: AuthStore,
    prefs: PrefsStore,
    toasts: Toasts,

    page: Page,
    assets: AssetsPage,
    ci_types: CiTypesPage,
    relationships: RelationshipsPage,
    lifecycles: LifecyclesPage,
    graph: GraphPage,
    login: LoginPage,
}

impl CmdbApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> anyhow::Result<Self> {
        let config = Config::from_env();
        info!(base_url = %config.base_url, "starting console");

        let api = ApiClient::new(&config);
        let auth = AuthStore::load();
        api.set_token(auth.token.clone());
        let prefs = PrefsStore::load();
        prefs.apply_theme(&cc.egui_ctx);

        Ok(Self {
            net: Net::new(api)?,
            auth,
            prefs,
            toasts: Toasts::default(),
            page: Page::Assets,
            assets: AssetsPage::default(),
            ci_types: CiTypesPage::default(),
            relationships: RelationshipsPage::default(),
            lifecycles: LifecyclesPage::default(),
            graph: GraphPage::default(),
            login: LoginPage::default(),
        })
    }

    fn log_out(&mut self) {
        self.auth.clear();
        self.net.api.clear_token();
        // Page state may hold data from the old session.
        self.reset_pages();
    }

    fn reset_pages(&mut self) {
        self.assets = AssetsPage::default();
        self.ci_types = CiTypesPage::default();
        self.relationships = RelationshipsPage::default();
        self.lifecycles = LifecyclesPage::default();
        self.graph = GraphPage::default();
    }

    fn handle_event(&mut self, event: Option<PageEvent>) {
        if let Some(PageEvent::AuthExpired) = event {
            self.toasts.info("Session expired, please sign in again");
            self.log_out();
        }
    }

    fn is_busy(&self) -> bool {
        match self.page {
            Page::Assets => self.assets.is_busy(),
            Page::CiTypes => self.ci_types.is_busy(),
            Page::Relationships => self.relationships.is_busy(),
            Page::Lifecycles => self.lifecycles.is_busy(),
            Page::Graph => self.graph.is_busy(),
        }
    }

    fn top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.toggle_value(&mut self.prefs.sidebar_open, "☰").changed() {
                    self.prefs.save();
                }
                ui.strong("CMDB Console");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Log out").clicked() {
                        self.log_out();
                    }
                    if let Some(user) = &self.auth.user {
                        ui.label(&user.name);
                    }
                    let theme_label = self.prefs.theme.label();
                    egui::ComboBox::from_id_salt("theme_picker")
                        .selected_text(theme_label)
                        .show_ui(ui, |ui| {
                            for theme in [Theme::System, Theme::Light, Theme::Dark] {
                                if ui
                                    .selectable_label(self.prefs.theme == theme, theme.label())
                                    .clicked()
                                    && self.prefs.theme != theme
                                {
                                    self.prefs.theme = theme;
                                    self.prefs.apply_theme(ctx);
                                    self.prefs.save();
                                }
                            }
                        });
                });
            });
        });
    }

    fn sidebar(&mut self, ctx: &egui::Context) {
        if !self.prefs.sidebar_open {
            return;
        }
        egui::SidePanel::left("nav")
            .resizable(false)
            .exact_width(150.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                for page in Page::ALL {
                    if ui.selectable_label(self.page == page, page.label()).clicked() {
                        self.page = page;
                    }
                }
            });
    }
}

impl eframe::App for CmdbApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.auth.is_authenticated() {
            if let Some(auth) = self.login.ui(ctx, &self.net) {
                self.net.api.set_token(Some(auth.token.clone()));
                self.auth.set_session(auth.token, auth.user);
                self.login = LoginPage::default();
                self.reset_pages();
            }
            self.toasts.draw(ctx);
            return;
        }

        self.top_bar(ctx);
        self.sidebar(ctx);

        let net = self.net.clone();
        let mut event = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            event = match self.page {
                Page::Assets => self.assets.ui(ui, &net, &mut self.toasts),
                Page::CiTypes => self.ci_types.ui(ui, &net, &mut self.toasts),
                Page::Relationships => self.relationships.ui(ui, &net, &mut self.toasts),
                Page::Lifecycles => self.lifecycles.ui(ui, &net, &mut self.toasts),
                Page::Graph => self.graph.ui(ui, &net, &mut self.toasts),
            };
        });
        self.handle_event(event);

        self.toasts.draw(ctx);

        // Requests land on worker threads; keep polling until they drain.
        if self.is_busy() {
            ctx.request_repaint();
        }
    }
}
