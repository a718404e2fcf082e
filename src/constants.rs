/// ASCII art banner for the menu screen.
pub const MENU_BANNER: [&str; 9] = [
    "                                                                   ",
    " ___  ___  ___  _____  ___  _     ___  ___  ___  ___              ",
    "| __|| __|| _ \\|_   _||_ _|| |   |_ _||_  /| __|| _ \\             ",
    "| _| | _| |   /  | |   | | | |__  | |  / / | _| |   /             ",
    "|_|  |___||_|_\\  |_|  |___||____||___|/___||___||_|_\\             ",
    "",
    "              soil in, fertilizer out",
    "",
    crate::constants::VERSION,
];

/// Version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
