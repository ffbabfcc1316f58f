//! Build command CLI definitions

use clap::Args;
use lineup::{Mode, Stat};

#[derive(Args)]
pub struct BuildArgs {
    /// Competitive mode (grand-tour, regular, tournament)
    #[arg(short, long, default_value = "grand-tour")]
    pub mode: Mode,

    /// Level cap (Grand Tour: 1-15, Tournament: 6/9/12/15; ignored in Regular)
    #[arg(short, long, allow_negative_numbers = true)]
    pub cap: Option<i64>,

    /// Tournament tier name (rookie, junior, challenger, master)
    #[arg(short, long, conflicts_with = "cap")]
    pub tier: Option<String>,

    /// Minimum total agility
    #[arg(long, default_value = "")]
    pub min_agility: String,

    /// Minimum total stamina
    #[arg(long, default_value = "")]
    pub min_stamina: String,

    /// Minimum total serve
    #[arg(long, default_value = "")]
    pub min_serve: String,

    /// Minimum total volley
    #[arg(long, default_value = "")]
    pub min_volley: String,

    /// Minimum total forehand
    #[arg(long, default_value = "")]
    pub min_forehand: String,

    /// Minimum total backhand
    #[arg(long, default_value = "")]
    pub min_backhand: String,

    /// Number of ranked lineups to list
    #[arg(short = 'n', long, default_value_t = 10)]
    pub top: usize,

    /// Show every slot of the lineup at this rank
    #[arg(short, long)]
    pub show: Option<usize>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl BuildArgs {
    /// Raw threshold inputs paired with their stat
    pub fn min_inputs(&self) -> [(Stat, &str); 6] {
        [
            (Stat::Agility, self.min_agility.as_str()),
            (Stat::Stamina, self.min_stamina.as_str()),
            (Stat::Serve, self.min_serve.as_str()),
            (Stat::Volley, self.min_volley.as_str()),
            (Stat::Forehand, self.min_forehand.as_str()),
            (Stat::Backhand, self.min_backhand.as_str()),
        ]
    }
}
