use ratatui::style::Color;

pub const STORAGE_KEY: &str = "activities";

pub const DATA_DIR_ENV: &str = "CALORIA_DATA_DIR";

pub const PROJECT: ProjectIdentity = ProjectIdentity {
    qualifier: "com",
    organization: "caloria",
    application: "caloria",
};

pub const MAX_BACKUPS: usize = 10;

pub const TIME_SETTINGS: TimeSettings = TimeSettings {
    poll_ms: 50,
    target_fps: 24,
};

pub const PALETTE: Palette = Palette {
    header: Color::Rgb(101, 163, 13),
    form: Color::Rgb(132, 204, 22),
    tracker: Color::Rgb(31, 41, 55),
    consumed: Color::Rgb(132, 204, 22),
    burned: Color::Rgb(249, 115, 22),
    muted: Color::Gray,
};

pub struct ProjectIdentity {
    pub qualifier: &'static str,
    pub organization: &'static str,
    pub application: &'static str,
}

pub struct TimeSettings {
    pub poll_ms: u64,
    pub target_fps: u64,
}

pub struct Palette {
    pub header: Color,
    pub form: Color,
    pub tracker: Color,
    pub consumed: Color,
    pub burned: Color,
    pub muted: Color,
}
