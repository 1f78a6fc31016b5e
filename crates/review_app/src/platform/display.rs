use std::io::Write;

/// Shows one image. The terminal build prints its reference and scale.
pub trait ItemDisplay {
    fn show(&mut self, display_ref: &str, zoom: f32);
}

pub struct TerminalDisplay<W: Write> {
    out: W,
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> ItemDisplay for TerminalDisplay<W> {
    fn show(&mut self, display_ref: &str, zoom: f32) {
        let _ = writeln!(self.out, ">> {display_ref} @ {:.0}%", zoom * 100.0);
        let _ = self.out.flush();
    }
}
