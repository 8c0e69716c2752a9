pub mod icon {
    pub const CHECK: &str = "✅";
    pub const ERROR: &str = "❌";
    pub const BELL: &str = "🔔";
    pub const GEAR: &str = "⚙️";
    pub const TIMER: &str = "⏱️";
    pub const TROPHY: &str = "🏆";
    pub const HASTAG: &str = "#️⃣";
    /// Back of a face-down tile.
    pub const HIDDEN: &str = "❔";
}
