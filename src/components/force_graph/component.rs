//! Leptos component wrapping the citation graph canvas.
//!
//! The component creates an HTML canvas element and wires up mouse/wheel event
//! handlers for node dragging, selection, panning, and zooming. An animation loop
//! runs via `requestAnimationFrame`, stepping the simulation and highlight
//! transition and redrawing each frame.
//!
//! The loop is owned by an [`AnimationLoop`] handle returned from the effect, so
//! replacing the data or unmounting the component cancels the pending frame and
//! detaches the resize listener.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::html::Canvas;
use leptos::prelude::*;
use log::{debug, error};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::interaction::PointerInput;
use super::render;
use super::scale::ScaleConfig;
use super::state::{ForceGraphState, SelectionChanged};
use super::theme::Theme;
use super::types::GraphData;

/// Fixed simulation step per animation frame, in seconds.
const FRAME_DT: f32 = 0.016;

/// Bundles graph state with visual configuration (scaling, theme).
struct GraphContext {
	state: ForceGraphState,
	scale: ScaleConfig,
	theme: Theme,
}

type SharedClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Running animation loop. Dropping it stops the loop.
struct AnimationLoop {
	alive: Rc<Cell<bool>>,
	frame: Rc<Cell<Option<i32>>>,
	animate: SharedClosure,
	resize: Option<Closure<dyn FnMut()>>,
}

impl Drop for AnimationLoop {
	fn drop(&mut self) {
		self.alive.set(false);
		if let Some(window) = web_sys::window() {
			if let Some(id) = self.frame.take() {
				let _ = window.cancel_animation_frame(id);
			}
			if let Some(cb) = self.resize.take() {
				let _ =
					window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
		// the closure holds a handle to its own cell
		self.animate.borrow_mut().take();
		debug!("citation-graph: animation loop stopped");
	}
}

fn viewport_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn canvas_context(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok().flatten()?.dyn_into().ok()
}

fn pointer_position(canvas_ref: NodeRef<Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas = canvas_ref.get_untracked()?;
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn update_cursor(canvas: &HtmlCanvasElement, state: &ForceGraphState) {
	let cursor = if state.dragged().is_some() || state.is_panning() {
		"grabbing"
	} else if state.hovered.is_some() {
		"pointer"
	} else {
		"grab"
	};
	let _ = web_sys::HtmlElement::style(canvas).set_property("cursor", cursor);
}

/// Renders an interactive citation graph on a canvas element.
///
/// Pass graph data via the reactive `data` signal; every new value replaces the
/// whole graph and restarts the layout. `on_select` receives the id of the
/// selected paper, or `None` when the selection is cleared (including when a
/// new graph replaces one with an active selection).
///
/// The component sizes itself to its parent container by default; set
/// `fullscreen = true` to fill the viewport and resize automatically with the
/// window. Explicit `width`/`height` override automatic sizing.
#[component]
pub fn CitationGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(optional, into)] on_select: Option<Callback<Option<String>>>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(optional)] theme: Option<Theme>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<Canvas>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let context_init = context.clone();

	Effect::new(move |prev: Option<Option<AnimationLoop>>| {
		let data = data.get();
		let replacing = matches!(prev, Some(Some(_)));
		drop(prev);

		let canvas = canvas_ref.get()?;
		let window = web_sys::window()?;

		let (w, h) = match fullscreen.then(|| viewport_size(&window)).flatten() {
			Some(size) => size,
			None => (
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
			),
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas_context(&canvas) else {
			error!("citation-graph: canvas has no 2d context");
			return None;
		};

		let theme = theme.clone().unwrap_or_default();
		let previous = context_init.borrow_mut().replace(GraphContext {
			state: ForceGraphState::new(&data, w, h, &theme),
			scale: ScaleConfig::default(),
			theme,
		});
		let had_selection = previous.is_some_and(|c| c.state.selection.is_active());
		if replacing && had_selection {
			if let Some(cb) = on_select.as_ref() {
				cb.run(None);
			}
		}
		if let Some(c) = context_init.borrow().as_ref() {
			update_cursor(&canvas, &c.state);
		}

		let resize = fullscreen.then(|| {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			let cb = Closure::<dyn FnMut()>::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(viewport_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(c) = context_resize.borrow_mut().as_mut() {
					c.state.resize(nw, nh);
				}
			});
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			cb
		});

		let handle = AnimationLoop {
			alive: Rc::new(Cell::new(true)),
			frame: Rc::new(Cell::new(None)),
			animate: Rc::new(RefCell::new(None)),
			resize,
		};

		let (context_anim, animate_inner) = (context_init.clone(), handle.animate.clone());
		let (alive, frame) = (handle.alive.clone(), handle.frame.clone());
		*handle.animate.borrow_mut() = Some(Closure::new(move || {
			if !alive.get() {
				return;
			}
			if let Some(c) = context_anim.borrow_mut().as_mut() {
				c.state.tick(FRAME_DT);
				render::render(&c.state, &ctx, &c.scale, &c.theme);
			}
			if let (Some(window), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				frame.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
			}
		}));
		if let Some(cb) = handle.animate.borrow().as_ref() {
			handle
				.frame
				.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
		}

		Some(handle)
	});

	// Feeds one input to the state and forwards any selection change after the
	// state borrow is released.
	let dispatch = Rc::new(move |input: PointerInput| {
		let change = {
			let mut guard = context.borrow_mut();
			let Some(c) = guard.as_mut() else {
				return;
			};
			let change = c.state.handle(input, &c.scale);
			if let Some(canvas) = canvas_ref.get_untracked() {
				update_cursor(&canvas, &c.state);
			}
			change
		};
		if let (Some(SelectionChanged(id)), Some(cb)) = (change, on_select.as_ref()) {
			cb.run(id);
		}
	});

	let dispatch_md = dispatch.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if let Some((x, y)) = pointer_position(canvas_ref, &ev) {
			dispatch_md(PointerInput::Down { x, y });
		}
	};

	let dispatch_mm = dispatch.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let Some((x, y)) = pointer_position(canvas_ref, &ev) {
			dispatch_mm(PointerInput::Move { x, y });
		}
	};

	let dispatch_mu = dispatch.clone();
	let on_mouseup = move |ev: MouseEvent| {
		if let Some((x, y)) = pointer_position(canvas_ref, &ev) {
			dispatch_mu(PointerInput::Up { x, y });
		}
	};

	let dispatch_ml = dispatch.clone();
	let on_mouseleave = move |_: MouseEvent| dispatch_ml(PointerInput::Leave);

	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some((x, y)) = pointer_position(canvas_ref, &ev) {
			dispatch(PointerInput::Wheel {
				x,
				y,
				delta_y: ev.delta_y(),
			});
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="citation-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
