use prospect_graph::{DisplayState, Focus, GraphSnapshot};

pub fn render_display_report(state: &DisplayState) -> String {
    let mut md = String::new();
    md.push_str("# Group analysis\n\n");

    let DisplayState::Graph {
        focus,
        graph,
        dimmed_nodes,
        ..
    } = state
    else {
        md.push_str(state.message().unwrap_or_default());
        md.push('\n');
        return md;
    };

    md.push_str(&format!("- Focus: {}\n", describe_focus(focus)));
    md.push_str(&format!(
        "- Companies: `{}`, connections: `{}`\n\n",
        graph.nodes.len(),
        graph.edges.len()
    ));

    md.push_str("## Companies\n\n");
    md.push_str("| key | name | saved | dimmed |\n");
    md.push_str("|---|---|---|---|\n");
    for node in &graph.nodes {
        md.push_str(&format!(
            "| `{}` | {} | {} | {} |\n",
            escape_cell(node.key().as_str()),
            escape_cell(node.label()),
            if node.is_saved() { "yes" } else { "no" },
            if dimmed_nodes.contains(node.key()) { "yes" } else { "no" },
        ));
    }
    md.push('\n');

    render_edges(&mut md, graph);
    md
}

fn render_edges(md: &mut String, graph: &GraphSnapshot) {
    md.push_str("## Connections\n\n");
    md.push_str("| from | to | via | kind |\n");
    md.push_str("|---|---|---|---|\n");
    for edge in &graph.edges {
        md.push_str(&format!(
            "| `{}` | `{}` | {} | {} |\n",
            escape_cell(edge.from.as_str()),
            escape_cell(edge.to.as_str()),
            escape_cell(&edge.contact),
            serde_json::to_value(edge.kind)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default(),
        ));
    }
}

fn describe_focus(focus: &Focus) -> String {
    match focus {
        Focus::Entity(key) => format!("company `{key}`"),
        Focus::Contact(name) => format!("contact {}", escape_cell(name)),
    }
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}
