use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::config::{GameConfig, GridSize};
use crate::food::spawn_position;
use crate::input::{direction_change_is_valid, Direction};
use crate::snake::{Position, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    /// Fresh board waiting for `start`.
    Idle,
    Running,
    Paused,
    /// Game over; only `restart` leaves this state.
    Terminal,
}

/// Why the game entered `Terminal`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// What one call to [`Game::advance`] did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The game was not running; nothing changed.
    Halted,
    /// The snake translated by one cell.
    Moved,
    /// The snake ate the food and grew by one cell.
    Ate,
    /// The move was refused and the game is over.
    Collided(DeathReason),
}

/// Tick engine owning all mutable state for one game.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    snake: Snake,
    direction: Direction,
    pending_direction: Direction,
    food: Option<Position>,
    score: u32,
    tick_count: u64,
    status: GameStatus,
    death_reason: Option<DeathReason>,
    rng: StdRng,
}

impl Game {
    /// Creates an idle game seeded from OS entropy.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::from_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic idle game for tests and reproducible runs.
    #[must_use]
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::from_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Creates a running game from an explicit board layout.
    ///
    /// `cells` lists the body head first. Returns `None` when `cells` is
    /// empty.
    #[must_use]
    pub fn with_layout(
        config: GameConfig,
        cells: Vec<Position>,
        direction: Direction,
        food: Option<Position>,
        seed: u64,
    ) -> Option<Self> {
        let snake = Snake::from_segments(cells)?;

        Some(Self {
            config,
            snake,
            direction,
            pending_direction: direction,
            food,
            score: 0,
            tick_count: 0,
            status: GameStatus::Running,
            death_reason: None,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    fn from_rng(config: GameConfig, mut rng: StdRng) -> Self {
        let snake = initial_snake(&config);
        let food = spawn_position(&mut rng, config.grid(), &snake);

        Self {
            config,
            snake,
            direction: Direction::Right,
            pending_direction: Direction::Right,
            food,
            score: 0,
            tick_count: 0,
            status: GameStatus::Idle,
            death_reason: None,
            rng,
        }
    }

    /// Leaves `Idle` and begins ticking.
    pub fn start(&mut self) {
        if self.status == GameStatus::Idle {
            info!(grid = ?self.config.grid(), "game started");
            self.status = GameStatus::Running;
        }
    }

    /// Toggles between `Running` and `Paused`; ignored in other states.
    pub fn pause(&mut self) {
        self.status = match self.status {
            GameStatus::Running => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Running,
            other => other,
        };
        debug!(status = ?self.status, "pause toggled");
    }

    /// Discards the current game and returns to a fresh `Idle` board.
    ///
    /// The random stream carries on, so successive games differ.
    pub fn restart(&mut self) {
        info!(score = self.score, ticks = self.tick_count, "game restarted");

        self.snake = initial_snake(&self.config);
        self.direction = Direction::Right;
        self.pending_direction = Direction::Right;
        self.food = spawn_position(&mut self.rng, self.config.grid(), &self.snake);
        self.score = 0;
        self.tick_count = 0;
        self.status = GameStatus::Idle;
        self.death_reason = None;
    }

    /// Queues a direction change for the next tick.
    ///
    /// Only accepted while running. A reversal of the current direction is
    /// dropped; anything else replaces the previously queued direction.
    pub fn enqueue_direction(&mut self, direction: Direction) {
        if self.status != GameStatus::Running {
            return;
        }
        if direction_change_is_valid(self.direction, direction) {
            self.pending_direction = direction;
        }
    }

    /// Advances simulation by one gameplay tick.
    pub fn advance(&mut self) -> TickOutcome {
        if self.status != GameStatus::Running {
            return TickOutcome::Halted;
        }

        if direction_change_is_valid(self.direction, self.pending_direction) {
            self.direction = self.pending_direction;
        }
        self.pending_direction = self.direction;
        self.tick_count += 1;

        let next_head = self.snake.head().stepped(self.direction);

        if !next_head.is_within_bounds(self.config.grid()) {
            return self.collide(DeathReason::WallCollision);
        }

        if self.snake.occupies(next_head) {
            return self.collide(DeathReason::SelfCollision);
        }

        self.snake.push_head(next_head);

        if self.food == Some(next_head) {
            self.score += 1;
            self.food = spawn_position(&mut self.rng, self.config.grid(), &self.snake);
            if self.food.is_none() {
                warn!(length = self.snake.len(), "no free cell left for food");
            }
            debug!(
                score = self.score,
                interval = ?self.tick_interval(),
                "food eaten"
            );
            return TickOutcome::Ate;
        }

        self.snake.drop_tail();
        TickOutcome::Moved
    }

    fn collide(&mut self, reason: DeathReason) -> TickOutcome {
        debug!(?reason, tick = self.tick_count, score = self.score, "collision");
        self.status = GameStatus::Terminal;
        self.death_reason = Some(reason);
        TickOutcome::Collided(reason)
    }

    /// Current tick interval for the scheduler to re-arm with.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.config.speed().interval_for_score(self.score)
    }

    #[must_use]
    pub fn speed_level(&self) -> u32 {
        self.config.speed().level_for_score(self.score)
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn food(&self) -> Option<Position> {
        self.food
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    /// Direction the snake moved on the last tick.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Direction that the next tick will try to adopt.
    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.config.grid()
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

fn initial_snake(config: &GameConfig) -> Snake {
    let grid = config.grid();
    let head = Position {
        x: i32::from(grid.width / 2),
        y: i32::from(grid.height / 2),
    };
    Snake::straight(head, Direction::Right, config.initial_length())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::config::{GameConfig, GridSize};
    use crate::input::Direction;
    use crate::snake::Position;
    use crate::speed::SpeedRamp;

    use super::{DeathReason, Game, GameStatus, TickOutcome};

    fn config_10x10() -> GameConfig {
        GameConfig::with_grid(10, 10).expect("10x10 grid is valid")
    }

    fn cells(points: &[(i32, i32)]) -> Vec<Position> {
        points.iter().map(|&(x, y)| Position::new(x, y)).collect()
    }

    fn body(game: &Game) -> Vec<Position> {
        game.snake().segments().copied().collect()
    }

    fn running(points: &[(i32, i32)], direction: Direction, food: Option<(i32, i32)>) -> Game {
        Game::with_layout(
            config_10x10(),
            cells(points),
            direction,
            food.map(|(x, y)| Position::new(x, y)),
            5,
        )
        .expect("layout is non-empty")
    }

    #[test]
    fn new_game_starts_idle_with_centred_snake() {
        let game = Game::with_seed(config_10x10(), 1);

        assert_eq!(game.status(), GameStatus::Idle);
        assert_eq!(body(&game), cells(&[(5, 5), (4, 5), (3, 5), (2, 5)]));
        assert_eq!(game.direction(), Direction::Right);
        assert_eq!(game.score(), 0);

        let food = game.food().expect("fresh board has room for food");
        assert!(!game.snake().occupies(food));
    }

    #[test]
    fn idle_and_paused_games_do_not_advance() {
        let mut game = Game::with_seed(config_10x10(), 2);
        let before = body(&game);

        assert_eq!(game.advance(), TickOutcome::Halted);
        assert_eq!(body(&game), before);

        game.start();
        game.pause();
        assert_eq!(game.status(), GameStatus::Paused);
        assert_eq!(game.advance(), TickOutcome::Halted);
        assert_eq!(body(&game), before);
        assert_eq!(game.tick_count(), 0);

        game.pause();
        assert_eq!(game.status(), GameStatus::Running);
        assert_ne!(game.advance(), TickOutcome::Halted);
    }

    #[test]
    fn plain_move_translates_without_growth() {
        let mut game = running(&[(5, 5), (4, 5), (3, 5), (2, 5)], Direction::Right, Some((0, 0)));

        assert_eq!(game.advance(), TickOutcome::Moved);

        assert_eq!(body(&game), cells(&[(6, 5), (5, 5), (4, 5), (3, 5)]));
        assert_eq!(game.score(), 0);
        assert_eq!(game.food(), Some(Position::new(0, 0)));
    }

    #[test]
    fn eating_food_grows_scores_and_relocates() {
        let mut game = running(&[(5, 5), (4, 5), (3, 5), (2, 5)], Direction::Right, Some((6, 5)));

        assert_eq!(game.advance(), TickOutcome::Ate);

        assert_eq!(body(&game), cells(&[(6, 5), (5, 5), (4, 5), (3, 5), (2, 5)]));
        assert_eq!(game.score(), 1);
        let food = game.food().expect("board has free cells");
        assert!(!game.snake().occupies(food));
    }

    #[test]
    fn wall_collision_leaves_snake_untouched() {
        let mut game = running(&[(0, 5), (1, 5), (2, 5), (3, 5)], Direction::Left, None);
        let before = body(&game);

        assert_eq!(
            game.advance(),
            TickOutcome::Collided(DeathReason::WallCollision)
        );

        assert_eq!(game.status(), GameStatus::Terminal);
        assert_eq!(game.death_reason(), Some(DeathReason::WallCollision));
        assert_eq!(body(&game), before);
    }

    #[test]
    fn every_edge_is_a_wall() {
        let layouts = [
            ((0, 0), Direction::Up),
            ((9, 9), Direction::Down),
            ((0, 4), Direction::Left),
            ((9, 4), Direction::Right),
        ];

        for ((x, y), direction) in layouts {
            let mut game = running(&[(x, y)], direction, None);
            assert_eq!(
                game.advance(),
                TickOutcome::Collided(DeathReason::WallCollision),
                "moving {direction:?} from ({x}, {y})"
            );
        }
    }

    #[test]
    fn self_collision_sets_terminal() {
        let mut game = running(
            &[(2, 2), (1, 2), (1, 3), (2, 3), (3, 3), (3, 2)],
            Direction::Left,
            None,
        );
        let before = body(&game);

        game.enqueue_direction(Direction::Down);
        assert_eq!(
            game.advance(),
            TickOutcome::Collided(DeathReason::SelfCollision)
        );

        assert_eq!(game.status(), GameStatus::Terminal);
        assert_eq!(body(&game), before);
    }

    #[test]
    fn moving_into_current_tail_cell_is_a_collision() {
        // A 2x2 loop: head (0,0) moving down lands on the tail (0,1).
        let mut game = running(&[(0, 0), (1, 0), (1, 1), (0, 1)], Direction::Left, None);

        game.enqueue_direction(Direction::Down);

        assert_eq!(
            game.advance(),
            TickOutcome::Collided(DeathReason::SelfCollision)
        );
    }

    #[test]
    fn queued_reversal_is_ignored() {
        let mut game = running(&[(5, 5), (4, 5), (3, 5)], Direction::Right, None);

        game.enqueue_direction(Direction::Left);
        game.advance();

        assert_eq!(game.snake().head(), Position::new(6, 5));
        assert_eq!(game.direction(), Direction::Right);
    }

    #[test]
    fn last_valid_press_between_ticks_wins() {
        let mut game = running(&[(5, 5), (4, 5), (3, 5)], Direction::Right, None);

        game.enqueue_direction(Direction::Up);
        game.enqueue_direction(Direction::Down);
        game.enqueue_direction(Direction::Left);
        game.advance();

        assert_eq!(game.direction(), Direction::Down);
        assert_eq!(game.snake().head(), Position::new(5, 6));
    }

    #[test]
    fn direction_queue_applies_once_per_tick() {
        let mut game = running(&[(5, 5), (4, 5), (3, 5)], Direction::Right, None);

        game.enqueue_direction(Direction::Up);
        game.advance();
        game.advance();

        assert_eq!(game.snake().head(), Position::new(5, 3));
        assert_eq!(game.pending_direction(), Direction::Up);
    }

    #[test]
    fn directions_are_ignored_unless_running() {
        let mut game = Game::with_seed(config_10x10(), 3);

        game.enqueue_direction(Direction::Up);
        assert_eq!(game.pending_direction(), Direction::Right);

        game.start();
        game.pause();
        game.enqueue_direction(Direction::Up);
        assert_eq!(game.pending_direction(), Direction::Right);
    }

    #[test]
    fn terminal_only_leaves_through_restart() {
        let mut game = running(&[(0, 0)], Direction::Up, None);
        game.advance();
        assert_eq!(game.status(), GameStatus::Terminal);

        game.start();
        game.pause();
        assert_eq!(game.status(), GameStatus::Terminal);
        assert_eq!(game.advance(), TickOutcome::Halted);

        game.restart();
        assert_eq!(game.status(), GameStatus::Idle);
        assert_eq!(game.death_reason(), None);
        assert_eq!(game.score(), 0);
        assert_eq!(game.tick_count(), 0);
        assert_eq!(body(&game), cells(&[(5, 5), (4, 5), (3, 5), (2, 5)]));
        assert!(game.food().is_some());
    }

    #[test]
    fn speed_ramps_at_score_milestones() {
        let mut game = running(&[(0, 0)], Direction::Right, Some((1, 0)));
        assert_eq!(game.tick_interval(), Duration::from_millis(200));

        for _ in 0..5 {
            assert_eq!(game.tick_interval(), Duration::from_millis(200));
            game.food = Some(game.snake().head().stepped(Direction::Right));
            assert_eq!(game.advance(), TickOutcome::Ate);
        }

        assert_eq!(game.score(), 5);
        assert_eq!(game.speed_level(), 2);
        assert_eq!(game.tick_interval(), Duration::from_millis(190));
    }

    #[test]
    fn filling_the_board_leaves_food_absent() {
        let config = GameConfig::new(
            GridSize {
                width: 2,
                height: 2,
            },
            1,
            SpeedRamp::default(),
        )
        .expect("2x2 grid fits a 1-cell snake");
        let mut game = Game::with_layout(
            config,
            cells(&[(1, 0), (0, 0), (0, 1)]),
            Direction::Down,
            Some(Position::new(1, 1)),
            8,
        )
        .expect("layout is non-empty");

        assert_eq!(game.advance(), TickOutcome::Ate);

        assert_eq!(game.snake().len(), 4);
        assert_eq!(game.food(), None);
        assert_eq!(game.status(), GameStatus::Running);
    }

    #[test]
    fn length_changes_only_when_food_is_eaten() {
        let mut game = Game::with_seed(config_10x10(), 21);
        game.start();
        let turns = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];

        for tick in 0..200 {
            if game.status() != GameStatus::Running {
                break;
            }
            if tick % 3 == 0 {
                game.enqueue_direction(turns[(tick / 3) % turns.len()]);
            }

            let before = game.snake().len();
            let outcome = game.advance();
            let after = game.snake().len();

            match outcome {
                TickOutcome::Ate => assert_eq!(after, before + 1),
                _ => assert_eq!(after, before),
            }
            assert!(!game.snake().has_overlap());
        }
    }
}
