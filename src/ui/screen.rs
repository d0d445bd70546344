use ratatui::Frame;
use rehearse::Route;

use crate::{
    ui::{results_view::render_results, room_view::render_room, setup_view::render_setup},
    App,
};

/// A UI Screen boundary: responsible for rendering the active route
pub trait Screen {
    fn render(&self, app: &App, f: &mut Frame);
}

/// Setup screen - the configuration form
pub struct SetupScreen;

impl Screen for SetupScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        render_setup(app, f);
    }
}

/// Room screen - the live interview
pub struct RoomScreen;

impl Screen for RoomScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        render_room(app, f);
    }
}

/// Results screen - score and feedback for the finished session
pub struct ResultsScreen;

impl Screen for ResultsScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        render_results(app, f);
    }
}

/// Helper to construct the appropriate screen for the current route
pub fn current_screen(route: &Route) -> Box<dyn Screen> {
    match route {
        Route::Setup => Box::new(SetupScreen),
        Route::Room => Box::new(RoomScreen),
        Route::Results => Box::new(ResultsScreen),
    }
}
