use wikiloop_core::{card_keys, AppViewModel, FieldView, RenderModel, Waypoint};

pub const TITLE: &str = "Wikiloop: A Wikipedia exploration game";

const WAITING_TEXT: &str = "Looking for a path, please wait...";
const SUCCESS_TEXT: &str = "There is a path! ( ￣▽￣)/";

pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = vec![String::new(), "Define your journey".to_string()];

    push_field(&mut lines, "Wikipedia starting page", &view.start);
    push_field(&mut lines, "Wikipedia goal page", &view.stop);

    lines.push(if view.can_submit {
        "[Compute path] type `go`".to_string()
    } else {
        "[Compute path] unavailable".to_string()
    });

    match &view.render {
        RenderModel::Empty => {}
        RenderModel::Waiting => lines.push(WAITING_TEXT.to_string()),
        RenderModel::Error { message, visited } => {
            lines.push(format!("Error: {message}"));
            push_cards(&mut lines, visited);
        }
        RenderModel::Journey(journey) => {
            lines.push(SUCCESS_TEXT.to_string());
            push_cards(&mut lines, journey);
        }
    }

    lines
}

fn push_field(lines: &mut Vec<String>, label: &str, field: &FieldView) {
    lines.push(format!("  {label}: {}", field.text));
    if !field.error_message.is_empty() {
        lines.push(format!("    ! {}", field.error_message));
    }
}

fn push_cards(lines: &mut Vec<String>, journey: &[Waypoint]) {
    for (position, (key, waypoint)) in card_keys(journey).iter().zip(journey).enumerate() {
        lines.push(format!("  {}. {key}", position + 1));
        lines.push(format!("     {}", waypoint.url));
        if !waypoint.text.is_empty() {
            lines.push(format!("     {}", waypoint.text));
        }
        if !waypoint.image.is_empty() {
            lines.push(format!("     image: {}", waypoint.image));
        }
    }
}
