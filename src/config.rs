/// Tunable constants for the canvas frame
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Browser wheel units per notch
    pub wheel_unit: f32,
    /// Zoom per tick is `exp(wheel_delta / wheel_zoom_divisor)`
    pub wheel_zoom_divisor: f32,
    /// Pixels per degree of orbit rotation (ctrl-drag)
    pub orbit_divisor: f32,
    /// Degrees of roll per pi radians swept around the canvas center (alt-drag)
    pub roll_gain: f32,
    /// Sweeps at or above this many radians are discarded as wraparound
    pub roll_guard: f32,
    /// Pixels per e-fold of dolly zoom (shift-drag)
    pub dolly_divisor: f32,
    /// Pixels per unit of pan translation (plain drag)
    pub pan_divisor: f32,
    /// Horizontal page chrome subtracted from the window width
    pub chrome_width: i32,
    /// Vertical page chrome subtracted from the window height
    pub chrome_height: i32,
    /// Number of frame-rate samples kept for the rolling average
    pub framerate_samples: usize,
    /// Status line refresh period in milliseconds
    pub status_interval_ms: i32,
    pub marker_key: String,
    pub marker_line_width: f32,
    pub marker_color: [f32; 3],
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            wheel_unit: 120.0,
            wheel_zoom_divisor: 16.0,
            orbit_divisor: 4.0,
            roll_gain: 128.0,
            roll_guard: std::f32::consts::FRAC_PI_2,
            dolly_divisor: 512.0,
            pan_divisor: 256.0,
            chrome_width: 20,
            chrome_height: 40,
            framerate_samples: 10,
            status_interval_ms: 500,
            marker_key: "jack".to_string(),
            marker_line_width: 3.0,
            marker_color: [0.0, 0.0, 1.0],
        }
    }
}
