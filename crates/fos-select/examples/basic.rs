//! Enhance a select and drive it from the keyboard.
//!
//! Run with `RUST_LOG=fos_select=trace` to watch the state machine.

use fos_dom::{Document, EventType, Key, ListenerOptions, OptionState, SelectState};
use fos_select::{SelectConfig, SelectHost};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut doc = Document::new();
    let body = doc.body();
    let tree = doc.tree_mut();
    let label = tree.create_label(Some("fruit"));
    tree.set_text_content(label, "Fruit");
    tree.append_child(body, label)?;
    let select = tree.create_select(SelectState::default());
    tree.set_attribute(select, "id", "fruit");
    tree.append_child(body, select)?;
    for (value, text) in [("apple", "Apple"), ("banana", "Banana"), ("avocado", "Avocado")] {
        let option = tree.create_option(OptionState::new(value, text));
        tree.append_child(select, option)?;
    }

    let mut host = SelectHost::new(doc);
    let config = SelectConfig::from_json(r#"{"isOpenClass": "open"}"#)?;
    let ids = host.custom_select("select", &config);
    let id = ids.first().copied().ok_or_else(|| anyhow::anyhow!("no select enhanced"))?;

    host.add_event_listener(select, EventType::Change, ListenerOptions::BUBBLE, |event| {
        println!("change on {}", event.target);
    });

    let container = host.select(id)?.container();
    host.key_down(container, Key::ArrowDown);
    host.key_down(container, Key::Char('a'));
    host.key_down(container, Key::Char('v'));
    host.key_down(container, Key::Enter);

    let widget = host.select(id)?;
    println!(
        "value = {:?}, opener shows {:?}",
        widget.value(),
        widget.opener_text()
    );
    Ok(())
}
