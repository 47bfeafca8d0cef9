//! Session bootstrap: one controller, its views, and the initial render.

use super::controller::GameController;
use super::model::GameModel;
use super::notifier::ViewNotifier;
use std::rc::Rc;
use tracing::{info, instrument, warn};

/// Builds a controller over `model`, registers `views` in order and sends
/// the initial-render signal.
///
/// A view that fails the initial render is logged and kept; it will catch up
/// on the next move.
#[instrument(skip_all)]
pub fn start_session(
    model: impl GameModel + 'static,
    views: impl IntoIterator<Item = Rc<dyn ViewNotifier>>,
) -> Rc<GameController> {
    let controller = GameController::new(model);

    for view in views {
        controller.register_view(view);
    }

    if let Err(e) = controller.render_initial() {
        warn!(error = %e, "Initial render incomplete");
    }

    info!(views = controller.view_count(), "Session started");
    controller
}
