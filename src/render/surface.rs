use web_sys::HtmlCanvasElement;

/// A drawing surface with a layout size and a separate backing store
pub trait Surface {
    /// Size the surface is displayed at, in CSS pixels
    fn display_size(&self) -> (u32, u32);
    /// Size of the allocated pixel buffer
    fn backing_size(&self) -> (u32, u32);
    fn set_backing_size(&mut self, width: u32, height: u32);
}

/// Match the backing store to the displayed size.
///
/// Writes only when the two differ, since every write reallocates the
/// backing store. Returns whether a resize happened.
pub fn resize_to_display<S: Surface + ?Sized>(surface: &mut S) -> bool {
    let display = surface.display_size();
    if surface.backing_size() != display {
        log::debug!(
            "resizing backing store {:?} -> {:?}",
            surface.backing_size(),
            display
        );
        surface.set_backing_size(display.0, display.1);
        true
    } else {
        false
    }
}

impl Surface for HtmlCanvasElement {
    fn display_size(&self) -> (u32, u32) {
        // client sizes are never negative
        (self.client_width().max(0) as u32, self.client_height().max(0) as u32)
    }

    fn backing_size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.set_width(width);
        self.set_height(height);
    }
}
