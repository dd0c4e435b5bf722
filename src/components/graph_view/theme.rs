//! Visual theming for the graph view.
//!
//! The renderer never picks colors on its own: every node and link color is
//! one of the slots below, chosen by the style callbacks in [`super::style`].

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Color slots consumed by the per-frame style callbacks.
///
/// "Active" marks the hovered neighborhood, "dimmed" everything else while a
/// highlight exists, "neutral" the resting look with no highlight at all.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	/// Canvas fill behind the graph.
	pub background: Color,
	pub node_active: Color,
	pub node_dimmed: Color,
	pub node_neutral: Color,
	pub link_active: Color,
	pub link_neutral: Color,
	/// Label text beside nodes.
	pub label: Color,
}

impl Theme {
	/// Dark theme (default): muted grays with a blue accent.
	pub fn dark() -> Self {
		Self {
			name: "dark",
			background: Color::rgb(37, 38, 43),
			node_active: Color::rgb(77, 171, 247),
			node_dimmed: Color::rgb(53, 53, 53),
			node_neutral: Color::rgb(138, 138, 138),
			link_active: Color::rgb(77, 171, 247),
			link_neutral: Color::rgb(53, 53, 53),
			label: Color::rgba(255, 255, 255, 0.85),
		}
	}

	/// Light theme for embedding on bright pages.
	pub fn light() -> Self {
		Self {
			name: "light",
			background: Color::rgb(248, 249, 250),
			node_active: Color::rgb(34, 139, 230),
			node_dimmed: Color::rgb(222, 226, 230),
			node_neutral: Color::rgb(134, 142, 150),
			link_active: Color::rgb(34, 139, 230),
			link_neutral: Color::rgb(222, 226, 230),
			label: Color::rgba(33, 37, 41, 0.9),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::dark()
	}
}
