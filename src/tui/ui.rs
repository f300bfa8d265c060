use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{MessageList, TitleBar};
use crate::tui::{Pane, TuiState};

/// Below this width the form and the list are stacked instead of side by side.
const SIDE_BY_SIDE_MIN_WIDTH: u16 = 80;

const KEY_HINTS: &str =
    "Tab/Shift+Tab focus · Ctrl+S submit · Ctrl+R refresh · F2 form · F3 list · Esc quit";

/// Splits the main area into (form, list).
fn split_main(main_area: Rect) -> (Rect, Rect) {
    use Constraint::{Length, Min, Percentage};
    if main_area.width >= SIDE_BY_SIDE_MIN_WIDTH {
        let [form, list] = Layout::horizontal([Percentage(40), Percentage(60)]).areas(main_area);
        (form, list)
    } else {
        let [form, list] = Layout::vertical([Length(17), Min(0)]).areas(main_area);
        (form, list)
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, help_area] = layout.areas(frame.area());

    TitleBar::new(app.backend_url().to_string(), app.status_message.clone())
        .render(frame, title_area);

    let (form_area, list_area) = split_main(main_area);

    tui.contact_form.render(frame, form_area);

    MessageList::new(
        &mut tui.message_list,
        &app.messages,
        app.is_loading(),
        app.fetch_error(),
        tui.pane == Pane::List,
    )
    .render(frame, list_area);

    frame.render_widget(
        Span::styled(KEY_HINTS, Style::default().fg(Color::DarkGray)),
        help_area,
    );
}
