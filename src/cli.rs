#[derive(clap::Parser, Debug)]
pub struct Args {
    /// Force Claude config path(s), comma-separated. Defaults to ~/.claude and ~/.config/claude
    #[arg(long, env = "CLAUDE_CONFIG_DIR")]
    pub claude_config_dir: Option<String>,

    /// Width of the usage bars in glyphs
    #[arg(long, default_value_t = 10)]
    pub bar_width: usize,

    /// Disable colored output (NO_COLOR is also honored)
    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    pub fn parse() -> Self {
        <Args as clap::Parser>::parse()
    }
}
