use agora_business::Notifications;
use agora_ui::AdminApp;
use agora_ui::pages::Page;
use agora_ui::state::State;
use egui_kittest::Harness;
use wiremock::MockServer;

pub struct TestCtx<'a> {
    _mock_server: Option<MockServer>,
    harness: Harness<'a, AdminApp>,
}

impl<'a> TestCtx<'a> {
    /// App over the in-memory seed data, with every table loaded.
    pub async fn seeded() -> Self {
        Self::loaded(AdminApp::new(State::seeded()), None).await
    }

    /// App talking to `mock_server`, with the first load finished.
    #[allow(unused)]
    pub async fn with_server(mock_server: MockServer) -> Self {
        let state = State::test(mock_server.uri());
        Self::loaded(AdminApp::new(state), Some(mock_server)).await
    }

    #[allow(unused)]
    pub async fn with_app(app: AdminApp) -> Self {
        Self::loaded(app, None).await
    }

    async fn loaded(app: AdminApp, mock_server: Option<MockServer>) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let harness = Harness::new_eframe(|_| app);
        let mut ctx = Self {
            _mock_server: mock_server,
            harness,
        };
        ctx.settle().await;
        ctx
    }

    pub fn harness_mut(&mut self) -> &mut Harness<'a, AdminApp> {
        &mut self.harness
    }

    #[allow(unused)]
    pub fn harness(&self) -> &Harness<'a, AdminApp> {
        &self.harness
    }

    pub fn state_mut(&mut self) -> &mut State {
        self.harness.state_mut().state_mut()
    }

    /// Draws a frame, waits for every dispatched command, then draws again.
    pub async fn settle(&mut self) {
        self.harness.step();
        self.state_mut().ctx.settle().await;
        for _ in 0..3 {
            self.harness.step();
        }
    }

    pub fn open(&mut self, page: Page) {
        self.state_mut().page = page;
        for _ in 0..3 {
            self.harness.step();
        }
    }

    /// Messages of every notification currently shown.
    #[allow(unused)]
    pub fn notices(&mut self) -> Vec<String> {
        self.state_mut()
            .ctx
            .state::<Notifications>()
            .map(|n| n.iter().map(|notice| notice.message.clone()).collect())
            .unwrap_or_default()
    }
}
