//! Function registry and the built-in LESS functions.
//!
//! The registry maps a function name to a native implementation taking
//! evaluated argument nodes and producing a result node. Names are
//! case-insensitive, as in LESS.
//!
//! ```
//! use lesstree::{FunctionRegistry, Node};
//!
//! let mut registry = FunctionRegistry::with_builtins();
//! registry.register("double", |args| match args {
//!     [Node::Dimension(d)] => Ok(Node::dimension(d.value * 2.0, "px")),
//!     _ => Ok(Node::number(0.0)),
//! });
//!
//! let result = registry.call("double", &[Node::dimension(4.0, "px")]).unwrap();
//! assert_eq!(result, Node::dimension(8.0, "px"));
//! ```
//!
//! ## Built-ins
//!
//! - Math: `ceil`, `floor`, `round`, `abs`, `sqrt`, `percentage`, `min`, `max`, `unit`
//! - Color construction: `rgb`, `rgba`, `hsl`, `hsla`
//! - Color operations: `lighten`, `darken`, `saturate`, `desaturate`, `fade`,
//!   `fadein`, `fadeout`, `spin`, `mix`, `greyscale`
//! - Channels: `red`, `green`, `blue`, `alpha`, `hue`, `saturation`, `lightness`
//! - Strings: `e`, `escape`

use std::collections::HashMap;
use std::fmt;

use crate::color::Color;
use crate::error::TreeError;
use crate::node::{Dimension, Node, Unit};

/// A native function implementation.
pub type LessFunction = Box<dyn Fn(&[Node]) -> Result<Node, TreeError>>;

/// Name → implementation mapping consulted when evaluating calls.
#[derive(Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, LessFunction>,
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.functions.keys().collect();
        names.sort();
        f.debug_struct("FunctionRegistry").field("functions", &names).finish()
    }
}

impl FunctionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in function.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        register_math(&mut registry);
        register_color(&mut registry);
        register_strings(&mut registry);
        registry
    }

    /// Registers (or replaces) a function.
    pub fn register<F>(&mut self, name: &str, function: F)
    where
        F: Fn(&[Node]) -> Result<Node, TreeError> + 'static,
    {
        self.functions.insert(name.to_lowercase(), Box::new(function));
    }

    /// Looks up a function by name.
    pub fn get(&self, name: &str) -> Option<&LessFunction> {
        self.functions.get(&name.to_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Invokes `name` with already evaluated arguments.
    pub fn call(&self, name: &str, args: &[Node]) -> Result<Node, TreeError> {
        let function = self
            .get(name)
            .ok_or_else(|| TreeError::UnknownFunction(name.to_string()))?;
        function(args)
    }
}

fn arg<'n>(function: &str, args: &'n [Node], index: usize) -> Result<&'n Node, TreeError> {
    args.get(index).ok_or_else(|| {
        TreeError::invalid_argument(function, format!("expected at least {} argument(s)", index + 1))
    })
}

fn dimension<'n>(function: &str, args: &'n [Node], index: usize) -> Result<&'n Dimension, TreeError> {
    match arg(function, args, index)? {
        Node::Dimension(d) => Ok(d),
        other => Err(TreeError::invalid_argument(
            function,
            format!("expected a number, got {} `{}`", other.kind(), other),
        )),
    }
}

fn color<'n>(function: &str, args: &'n [Node], index: usize) -> Result<&'n Color, TreeError> {
    match arg(function, args, index)? {
        Node::Color(c) => Ok(c),
        other => Err(TreeError::invalid_argument(
            function,
            format!("expected a color, got {} `{}`", other.kind(), other),
        )),
    }
}

/// Percentages and plain numbers both mean "value / 100" for amounts.
fn amount(function: &str, args: &[Node], index: usize) -> Result<f64, TreeError> {
    Ok(dimension(function, args, index)?.value / 100.0)
}

/// A 0-1 fraction: `50%` and `0.5` are the same.
fn fraction(function: &str, args: &[Node], index: usize) -> Result<f64, TreeError> {
    let d = dimension(function, args, index)?;
    if d.unit.numerator.first().map(String::as_str) == Some("%") {
        Ok(d.value / 100.0)
    } else {
        Ok(d.value)
    }
}

/// A 0-255 channel: `100%` is 255.
fn channel(function: &str, args: &[Node], index: usize) -> Result<f64, TreeError> {
    let d = dimension(function, args, index)?;
    if d.unit.numerator.first().map(String::as_str) == Some("%") {
        Ok(d.value * 2.55)
    } else {
        Ok(d.value)
    }
}

fn text(function: &str, args: &[Node], index: usize) -> Result<String, TreeError> {
    match arg(function, args, index)? {
        Node::Quoted(q) => Ok(q.value.clone()),
        Node::Keyword(k) => Ok(k.clone()),
        other => Err(TreeError::invalid_argument(
            function,
            format!("expected a string, got {} `{}`", other.kind(), other),
        )),
    }
}

fn map_dimension(args: &[Node], name: &str, f: impl Fn(f64) -> f64) -> Result<Node, TreeError> {
    let d = dimension(name, args, 0)?;
    Ok(Node::Dimension(Dimension::new(f(d.value), d.unit.clone())))
}

fn register_math(registry: &mut FunctionRegistry) {
    registry.register("ceil", |args| map_dimension(args, "ceil", f64::ceil));
    registry.register("floor", |args| map_dimension(args, "floor", f64::floor));
    registry.register("abs", |args| map_dimension(args, "abs", f64::abs));
    registry.register("sqrt", |args| map_dimension(args, "sqrt", f64::sqrt));
    registry.register("round", |args| {
        let places = match args.get(1) {
            Some(_) => dimension("round", args, 1)?.value.max(0.0) as i32,
            None => 0,
        };
        let scale = 10f64.powi(places);
        map_dimension(args, "round", |v| (v * scale).round() / scale)
    });
    registry.register("percentage", |args| {
        let d = dimension("percentage", args, 0)?;
        Ok(Node::dimension(d.value * 100.0, "%"))
    });
    registry.register("min", |args| extremum(args, "min", |a, b| a < b));
    registry.register("max", |args| extremum(args, "max", |a, b| a > b));
    registry.register("unit", |args| {
        let d = dimension("unit", args, 0)?;
        let unit = match args.get(1) {
            Some(_) => Unit::simple(&text("unit", args, 1)?),
            None => Unit::none(),
        };
        Ok(Node::Dimension(Dimension::new(d.value, unit)))
    });
}

fn extremum(args: &[Node], name: &str, better: fn(f64, f64) -> bool) -> Result<Node, TreeError> {
    let mut best = dimension(name, args, 0)?;
    for index in 1..args.len() {
        let candidate = dimension(name, args, index)?;
        if better(candidate.value, best.value) {
            best = candidate;
        }
    }
    Ok(Node::Dimension(best.clone()))
}

fn register_color(registry: &mut FunctionRegistry) {
    registry.register("rgb", |args| {
        Ok(Node::Color(Color::rgb(
            channel("rgb", args, 0)?,
            channel("rgb", args, 1)?,
            channel("rgb", args, 2)?,
        )))
    });
    registry.register("rgba", |args| {
        Ok(Node::Color(Color::rgba(
            channel("rgba", args, 0)?,
            channel("rgba", args, 1)?,
            channel("rgba", args, 2)?,
            fraction("rgba", args, 3)?,
        )))
    });
    registry.register("hsl", |args| {
        Ok(Node::Color(Color::from_hsl(
            dimension("hsl", args, 0)?.value,
            fraction("hsl", args, 1)?,
            fraction("hsl", args, 2)?,
            1.0,
        )))
    });
    registry.register("hsla", |args| {
        Ok(Node::Color(Color::from_hsl(
            dimension("hsla", args, 0)?.value,
            fraction("hsla", args, 1)?,
            fraction("hsla", args, 2)?,
            fraction("hsla", args, 3)?,
        )))
    });

    registry.register("lighten", |args| {
        Ok(Node::Color(color("lighten", args, 0)?.lighten(amount("lighten", args, 1)?)))
    });
    registry.register("darken", |args| {
        Ok(Node::Color(color("darken", args, 0)?.darken(amount("darken", args, 1)?)))
    });
    registry.register("saturate", |args| {
        Ok(Node::Color(color("saturate", args, 0)?.saturate(amount("saturate", args, 1)?)))
    });
    registry.register("desaturate", |args| {
        Ok(Node::Color(color("desaturate", args, 0)?.desaturate(amount("desaturate", args, 1)?)))
    });
    registry.register("greyscale", |args| {
        Ok(Node::Color(color("greyscale", args, 0)?.desaturate(1.0)))
    });
    registry.register("spin", |args| {
        Ok(Node::Color(color("spin", args, 0)?.spin(dimension("spin", args, 1)?.value)))
    });
    registry.register("fade", |args| {
        let c = color("fade", args, 0)?;
        Ok(Node::Color(c.with_alpha(amount("fade", args, 1)?.clamp(0.0, 1.0))))
    });
    registry.register("fadein", |args| {
        let c = color("fadein", args, 0)?;
        Ok(Node::Color(c.with_alpha((c.alpha + amount("fadein", args, 1)?).clamp(0.0, 1.0))))
    });
    registry.register("fadeout", |args| {
        let c = color("fadeout", args, 0)?;
        Ok(Node::Color(c.with_alpha((c.alpha - amount("fadeout", args, 1)?).clamp(0.0, 1.0))))
    });
    registry.register("mix", |args| {
        let weight = match args.get(2) {
            Some(_) => amount("mix", args, 2)?,
            None => 0.5,
        };
        Ok(Node::Color(color("mix", args, 0)?.mix(color("mix", args, 1)?, weight)))
    });

    registry.register("red", |args| Ok(Node::number(color("red", args, 0)?.rgb[0])));
    registry.register("green", |args| Ok(Node::number(color("green", args, 0)?.rgb[1])));
    registry.register("blue", |args| Ok(Node::number(color("blue", args, 0)?.rgb[2])));
    registry.register("alpha", |args| Ok(Node::number(color("alpha", args, 0)?.alpha)));
    registry.register("hue", |args| {
        Ok(Node::number(color("hue", args, 0)?.to_hsl().0.round()))
    });
    registry.register("saturation", |args| {
        Ok(Node::dimension((color("saturation", args, 0)?.to_hsl().1 * 100.0).round(), "%"))
    });
    registry.register("lightness", |args| {
        Ok(Node::dimension((color("lightness", args, 0)?.to_hsl().2 * 100.0).round(), "%"))
    });
}

fn register_strings(registry: &mut FunctionRegistry) {
    registry.register("e", |args| Ok(Node::Keyword(text("e", args, 0)?)));
    registry.register("escape", |args| {
        let raw = text("escape", args, 0)?;
        let mut escaped = String::with_capacity(raw.len());
        for c in raw.chars() {
            match c {
                '=' | ':' | '#' | ';' | '(' | ')' => escaped.push_str(&format!("%{:02X}", c as u32)),
                _ => escaped.push(c),
            }
        }
        Ok(Node::Keyword(escaped))
    });
}
