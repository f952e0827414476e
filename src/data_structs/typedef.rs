pub type PosType = u32;
pub type CountType = u32;
pub type ScoreType = u16;
pub type DensityType = f64;

/// Number of integer percentage buckets, 0..=100.
pub const PERCENT_BUCKETS: usize = 101;
/// Side length of the joint histogram. One guard slot past 100 keeps the
/// side even so it can be block averaged.
pub const JOINT_SIDE: usize = 102;
/// Highest bedMethyl score.
pub const MAX_SCORE: ScoreType = 1000;
/// Chromosome names this long or longer are treated as non-standard contigs.
pub const MAX_CHROMOSOME_NAME_LEN: usize = 6;
