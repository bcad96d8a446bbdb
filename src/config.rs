/// Timing constants of the game, all in milliseconds
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Lit time of a presented color at level 1
    pub presentation_ms: u32,
    /// Base of the difficulty penalty taken off `presentation_ms`
    pub presentation_penalty_ms: u32,
    /// Dark gap between presented colors at level 1
    pub pause_ms: u32,
    /// Base of the difficulty penalty taken off `pause_ms`
    pub pause_penalty_ms: u32,
    /// Player response timeout
    pub player_timeout_ms: u32,
    /// Hold between the end of one sequence and the first color of the next
    pub level_intro_ms: u32,
    /// Light and tone after a correct press
    pub feedback_ms: u32,
    /// One step of the start animation and of the game over melody
    pub animation_step_ms: u32,
    /// Buzzer audible on boot
    pub sound: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            presentation_ms: 500,
            presentation_penalty_ms: 400,
            pause_ms: 300,
            pause_penalty_ms: 200,
            player_timeout_ms: 5_000,
            level_intro_ms: 1_000,
            feedback_ms: 200,
            animation_step_ms: 100,
            sound: true,
        }
    }
}
