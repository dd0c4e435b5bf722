//! Leptos component wrapping the interactive graph canvas.
//!
//! The component creates an HTML canvas element and wires up mouse/wheel
//! event handlers for node dragging, panning, zooming, and hover highlight.
//! An animation loop runs via `requestAnimationFrame`, advancing the physics
//! simulation and redrawing each frame. The primary mouse button is tracked
//! with window-level capture listeners, so presses that begin or end outside
//! the canvas still update the held flag.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::scale::ScaleConfig;
use super::state::{GraphViewState, PointerTarget};
use super::theme::Theme;
use super::types::GraphData;

/// Bundles view state with visual configuration.
struct GraphContext {
	state: GraphViewState,
	scale: ScaleConfig,
	theme: Theme,
}

/// Renders an interactive node-link graph on a canvas element.
///
/// Pass graph data via the reactive `data` signal; when the signal changes
/// the graph is rebuilt from scratch. A dataset that fails to build (a link
/// referencing a missing node) is logged and skipped, keeping the previous
/// graph on screen. The component sizes itself to its parent container by
/// default; set `fullscreen = true` to fill the viewport and resize
/// automatically with the window. Explicit `width`/`height` override
/// automatic sizing.
#[component]
pub fn GraphViewCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let button_cbs: Rc<RefCell<Vec<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(Vec::new()));
	let (context_init, animate_init, resize_cb_init, button_cbs_init) = (
		context.clone(),
		animate.clone(),
		resize_cb.clone(),
		button_cbs.clone(),
	);

	// Mount-time setup: canvas sizing, initial build, window listeners, and
	// the animation loop. Runs once when the canvas node appears.
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = if fullscreen {
			(
				window.inner_width().unwrap().as_f64().unwrap(),
				window.inner_height().unwrap().as_f64().unwrap(),
			)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		let state = match GraphViewState::new(&data.get_untracked(), w, h) {
			Ok(state) => state,
			Err(err) => {
				log::error!("graph build failed: {err}");
				GraphViewState::new(&GraphData::default(), w, h).expect("empty graph")
			}
		};
		*context_init.borrow_mut() = Some(GraphContext {
			state,
			scale: ScaleConfig::default(),
			theme: Theme::default(),
		});

		// Track the primary button across the whole window, in the capture
		// phase, so a press that starts outside the canvas still suppresses
		// the hover-leave clear.
		{
			let context_down = context_init.clone();
			let down = Closure::new(move || {
				if let Some(ref mut c) = *context_down.borrow_mut() {
					c.state.pointer_held = true;
				}
			});
			let context_up = context_init.clone();
			let up = Closure::new(move || {
				if let Some(ref mut c) = *context_up.borrow_mut() {
					c.state.pointer_held = false;
				}
			});
			let _ = window.add_event_listener_with_callback_and_bool(
				"mousedown",
				down.as_ref().unchecked_ref(),
				true,
			);
			let _ = window.add_event_listener_with_callback_and_bool(
				"mouseup",
				up.as_ref().unchecked_ref(),
				true,
			);
			button_cbs_init.borrow_mut().extend([down, up]);
		}

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let win: Window = web_sys::window().unwrap();
				let (nw, nh) = (
					win.inner_width().unwrap().as_f64().unwrap(),
					win.inner_height().unwrap().as_f64().unwrap(),
				);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.state.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		let mut last_frame = js_sys::Date::now();
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let now = js_sys::Date::now();
			// Clamp so a backgrounded tab does not produce one huge step.
			let dt = ((now - last_frame) / 1000.0).min(0.1) as f32;
			last_frame = now;

			if let Some(ref mut c) = *context_anim.borrow_mut() {
				if c.state.animation_running {
					c.state.tick(dt);
				}
				render::render(&c.state, &ctx, &c.scale, &c.theme);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// Dataset changes rebuild the prepared graph. The first run only
	// subscribes to the signal; mount already built from the same data. A
	// failed rebuild keeps the previous graph on screen.
	let context_data = context.clone();
	Effect::new(move |prev: Option<()>| {
		let data = data.get();
		if prev.is_none() {
			return;
		}
		if let Some(ref mut c) = *context_data.borrow_mut() {
			match GraphViewState::new(&data, c.state.width, c.state.height) {
				Ok(state) => c.state = state,
				Err(err) => log::error!("graph rebuild failed, keeping previous graph: {err}"),
			}
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_md.borrow_mut() {
			if let Some(node) = c.state.node_at_position(x, y, &c.scale) {
				c.state.begin_drag(node, x, y);
			} else {
				c.state.pan.active = true;
				c.state.pan.start_x = x;
				c.state.pan.start_y = y;
				c.state.pan.transform_start_x = c.state.transform.x;
				c.state.pan.transform_start_y = c.state.transform.y;
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_mm.borrow_mut() {
			// Update hover state when not dragging
			if !c.state.drag.active {
				let target = c.state.pointer_target_at(x, y, &c.scale);
				c.state.set_hover(target);
			}

			if c.state.drag.active {
				c.state.drag_to(x, y);
			} else if c.state.pan.active {
				c.state.transform.x = c.state.pan.transform_start_x + (x - c.state.pan.start_x);
				c.state.transform.y = c.state.pan.transform_start_y + (y - c.state.pan.start_y);
			}
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			c.state.end_drag();
			c.state.pan.active = false;
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.end_drag();
			c.state.pan.active = false;
			c.state.set_hover(PointerTarget::None);
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (c.state.transform.k * factor).clamp(0.1, 10.0);
			let ratio = new_k / c.state.transform.k;
			c.state.transform.x = x - (x - c.state.transform.x) * ratio;
			c.state.transform.y = y - (y - c.state.transform.y) * ratio;
			c.state.transform.k = new_k;
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="graph-view-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
