//! Embedded stylesheet.
//!
//! Served from the binary rather than the filesystem, at a route derived
//! from the program's own name.

pub fn route() -> String {
    format!("/{}.css", env!("CARGO_PKG_NAME"))
}

pub const STYLESHEET: &str = "\
body { font-family: system-ui, sans-serif; margin: 2rem; color: #222; }
h1 { font-size: 1.3rem; border-bottom: 1px solid #ddd; padding-bottom: 0.5rem; }
table { border-collapse: collapse; min-width: 40rem; }
th, td { padding: 0.3rem 1rem 0.3rem 0; text-align: left; }
th { border-bottom: 1px solid #bbb; }
td { border-bottom: 1px solid #eee; font-variant-numeric: tabular-nums; }
a { text-decoration: none; color: #0366d6; }
a:hover { text-decoration: underline; }
";
