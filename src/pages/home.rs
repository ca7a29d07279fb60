use leptos::ev;
use leptos::prelude::*;

use super::datasets::{DataMode, dataset};
use crate::components::graph_canvas::{Graph, GraphCanvas, GraphController, LayoutStrategy, NodeId};

const OPTION_TEXT_LIMIT: usize = 19;
const DEFAULT_ANIMATE_DELAY_MS: u32 = 250;
const MIN_ANIMATE_DELAY_MS: i64 = 100;
const MAX_ANIMATE_DELAY_MS: i64 = 2000;

/// One entry of the connect-from / connect-to selectors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeOption {
	pub value: NodeId,
	pub title: String,
	pub text: String,
}

/// Selector entries for `ids`, labelled like the tooltips and truncated for width.
pub fn node_options(graph: &Graph, ids: &[NodeId]) -> Vec<NodeOption> {
	let mut ids: Vec<&NodeId> = ids.iter().collect();
	ids.sort();
	ids.into_iter()
		.filter_map(|id| {
			let title = graph.get(id)?.display_label(id);
			let text = if title.chars().count() > OPTION_TEXT_LIMIT {
				format!("{}...", title.chars().take(OPTION_TEXT_LIMIT).collect::<String>())
			} else {
				title.clone()
			};
			Some(NodeOption {
				value: id.clone(),
				title,
				text,
			})
		})
		.collect()
}

/// Animation delay typed by the user, clamped to a sane range.
pub fn parse_delay(text: &str) -> u32 {
	let raw = text
		.trim()
		.parse::<i64>()
		.ok()
		.filter(|v| *v != 0)
		.unwrap_or(DEFAULT_ANIMATE_DELAY_MS as i64);
	raw.clamp(MIN_ANIMATE_DELAY_MS, MAX_ANIMATE_DELAY_MS) as u32
}

/// Graph page with its control surface.
#[component]
pub fn Home() -> impl IntoView {
	let controller = GraphController::default();

	let mode = RwSignal::new(DataMode::default());
	let strategy = RwSignal::new(LayoutStrategy::default());
	let drawn = RwSignal::new(false);
	let busy = RwSignal::new(false);
	let tooltips = RwSignal::new(false);
	let node_ids: RwSignal<Vec<NodeId>> = RwSignal::new(Vec::new());
	let connect_from = RwSignal::new(String::new());
	let connect_to = RwSignal::new(String::new());
	let delay_text = RwSignal::new(DEFAULT_ANIMATE_DELAY_MS.to_string());

	let graph_data = Signal::derive(move || dataset(mode.get()).graph);
	let options = Memo::new(move |_| graph_data.with(|graph| node_options(graph, &node_ids.get())));

	// Tooltips stay off while a path animates; the animation owns the label then.
	let controller_tt = controller.clone();
	Effect::new(move |_| controller_tt.set_tooltips(tooltips.get() && !busy.get()));

	let forget_drawing = move || {
		drawn.set(false);
		node_ids.set(Vec::new());
	};

	let on_mode = move |ev: ev::Event| {
		mode.set(if event_target_value(&ev) == "0" {
			DataMode::Students
		} else {
			DataMode::Groups
		});
		forget_drawing();
	};

	let controller_algo = controller.clone();
	let on_strategy = move |ev: ev::Event| {
		let chosen = if event_target_value(&ev) == "0" {
			LayoutStrategy::Cartesian
		} else {
			LayoutStrategy::Radial
		};
		strategy.set(chosen);
		controller_algo.set_strategy(chosen);
		forget_drawing();
	};

	let controller_draw = controller.clone();
	let on_draw = move |_: ev::MouseEvent| {
		let ids = controller_draw.draw();
		connect_from.set(ids.first().cloned().unwrap_or_default());
		connect_to.set(ids.get(1).or(ids.first()).cloned().unwrap_or_default());
		node_ids.set(ids);
		drawn.set(true);
	};

	let controller_reset = controller.clone();
	let controller_in = controller.clone();
	let controller_out = controller.clone();

	let controller_connect = controller.clone();
	let on_connect = move |_: ev::MouseEvent| {
		busy.set(true);
		controller_connect.connect(
			&connect_from.get_untracked(),
			&connect_to.get_untracked(),
			Box::new(move || busy.set(false)),
		);
	};

	let controller_ref = controller.clone();
	let show_reference_path = move |delay_ms: u32| {
		let path = dataset(mode.get_untracked()).reference_path;
		busy.set(true);
		controller_ref.draw_path(&path, delay_ms, Box::new(move || busy.set(false)));
	};
	let show_reference = show_reference_path.clone();
	let on_draw_reference = move |_: ev::MouseEvent| show_reference(0);
	let on_animate_reference = move |_: ev::MouseEvent| {
		show_reference_path(parse_delay(&delay_text.get_untracked()))
	};

	let controller_clear = controller.clone();

	view! {
		<div class="graph-page">
			<div class="controls">
				<span class="DEPdataMode">
					{move || format!("Data Mode: {}", mode.get().name())}
				</span>
				<select on:change=on_mode prop:disabled=move || busy.get()>
					<option value="0" selected=move || mode.get() == DataMode::Students>
						"Students"
					</option>
					<option value="1" selected=move || mode.get() == DataMode::Groups>
						"Groups"
					</option>
				</select>
				<select on:change=on_strategy prop:disabled=move || busy.get()>
					<option value="0" selected=move || strategy.get() == LayoutStrategy::Cartesian>
						"Cartesian"
					</option>
					<option value="1" selected=move || strategy.get() == LayoutStrategy::Radial>
						"Radial"
					</option>
				</select>
				<button on:click=on_draw prop:disabled=move || busy.get()>
					{move || if drawn.get() { "Redraw" } else { "Draw" }}
				</button>

				<button
					on:click=move |_| controller_reset.reset_zoom()
					prop:disabled=move || !drawn.get()
				>
					"Reset Zoom"
				</button>
				<button
					on:click=move |_| controller_in.zoom_step(true)
					prop:disabled=move || !drawn.get()
				>
					"+"
				</button>
				<button
					on:click=move |_| controller_out.zoom_step(false)
					prop:disabled=move || !drawn.get()
				>
					"-"
				</button>

				<select
					prop:value=move || connect_from.get()
					on:change=move |ev| connect_from.set(event_target_value(&ev))
					prop:disabled=move || busy.get()
				>
					{move || node_select_options(options.get())}
				</select>
				<select
					prop:value=move || connect_to.get()
					on:change=move |ev| connect_to.set(event_target_value(&ev))
					prop:disabled=move || busy.get()
				>
					{move || node_select_options(options.get())}
				</select>
				<button on:click=on_connect prop:disabled=move || busy.get() || !drawn.get()>
					"Connect"
				</button>

				<button on:click=on_draw_reference prop:disabled=move || busy.get()>
					"Draw Path"
				</button>
				<button on:click=on_animate_reference prop:disabled=move || busy.get()>
					"Animate Path"
				</button>
				<input
					type="number"
					prop:value=move || delay_text.get()
					on:change=move |ev| {
						delay_text.set(parse_delay(&event_target_value(&ev)).to_string())
					}
				/>
				<button
					on:click=move |_| controller_clear.clear_path()
					prop:disabled=move || busy.get()
				>
					"Clear Path"
				</button>

				<button on:click=move |_| tooltips.update(|on| *on = !*on)>
					{move || if tooltips.get() { "Disable" } else { "Enable" }}
				</button>
			</div>
			<GraphCanvas controller=controller data=graph_data />
		</div>
	}
}

fn node_select_options(options: Vec<NodeOption>) -> AnyView {
	if options.is_empty() {
		return view! { <option value="Draw First">"Draw First"</option> }.into_any();
	}
	options
		.into_iter()
		.map(|option| {
			view! {
				<option value=option.value title=option.title>
					{option.text}
				</option>
			}
		})
		.collect_view()
		.into_any()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::graph_canvas::Node;

	#[test]
	fn options_are_sorted_labelled_and_truncated() {
		let mut graph = Graph::new();
		graph.insert("zed".into(), Node::default());
		graph.insert("amy".into(), Node::with_label("Amelia Constance Worthington"));
		let ids = vec!["zed".to_string(), "amy".to_string(), "ghost".to_string()];

		let options = node_options(&graph, &ids);
		assert_eq!(options.len(), 2);
		assert_eq!(options[0].value, "amy");
		assert_eq!(options[0].text, "Amelia Constance Wo...");
		assert_eq!(options[0].title, "Amelia Constance Worthington");
		assert_eq!(options[1].text, "Zed");
	}

	#[test]
	fn delay_is_clamped_with_default() {
		assert_eq!(parse_delay("abc"), 250);
		assert_eq!(parse_delay("0"), 250);
		assert_eq!(parse_delay("40"), 100);
		assert_eq!(parse_delay(" 900 "), 900);
		assert_eq!(parse_delay("99999"), 2000);
	}
}
