use crate::error::*;
use crate::{Game, DOORS};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 挑战者抉择
#[derive(Debug, Serialize, Deserialize, Copy, Clone, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// 改变选择
    Switch,

    /// 坚持选择
    Stay,
}

impl Strategy {
    /// 该抉择在这一局中能否赢得奖品
    pub fn wins(&self, game: &Game) -> Result<bool> {
        match self {
            Strategy::Switch => game.switch_wins(),
            Strategy::Stay => game.stay_wins(),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Switch => f.write_str("switch"),
            Strategy::Stay => f.write_str("stay"),
        }
    }
}

/// 同一抉择多轮游戏的结果
#[derive(Debug, Serialize, Deserialize, Copy, Clone, Eq, PartialEq)]
pub struct TrialResult {
    /// 采用的抉择
    pub strategy: Strategy,

    /// 轮数
    pub trials: u32,

    /// 赢得奖品的轮数
    pub wins: u32,
}

impl TrialResult {
    /// 胜率（百分比）
    pub fn win_rate(&self) -> f64 {
        self.wins as f64 * 100.0 / self.trials as f64
    }
}

impl fmt::Display for TrialResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "we have {} winners, {:?}%", self.wins, self.win_rate())
    }
}

/// 两种抉择的对比结果
#[derive(Debug, Serialize, Deserialize, Copy, Clone, Eq, PartialEq)]
pub struct Comparison {
    pub switch: TrialResult,
    pub stay: TrialResult,
}

impl Comparison {
    /// 更好的抉择，平局时坚持
    pub fn best(&self) -> Strategy {
        if self.switch.wins > self.stay.wins {
            Strategy::Switch
        } else {
            Strategy::Stay
        }
    }
}

/// 对比过程中的进度事件
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Progress<'a> {
    /// 即将以 `strategy` 进行 `count` 轮
    Started { strategy: Strategy, count: u32 },

    /// 该抉择的全部轮次已完成
    Finished(&'a TrialResult),
}

/// 模拟器，持有自己的随机数生成器
#[derive(Debug)]
pub struct Simulator<R> {
    rng: R,
}

impl Simulator<StdRng> {
    /// 固定种子，结果可复现
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> Simulator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// 随机布置一局并随机选择一扇门
    pub fn random_game(&mut self) -> Result<Game> {
        let chosen = self.rng.gen_range(0..DOORS);
        Game::random(&mut self.rng).choose(chosen)
    }

    /// 进行一轮游戏，返回是否赢得奖品
    pub fn play(&mut self, strategy: Strategy) -> Result<bool> {
        let game = self.random_game()?;
        let win = strategy.wins(&game)?;
        tracing::trace!(?game, %strategy, win, "round finished");
        Ok(win)
    }

    /// 以同一抉择进行 `count` 轮游戏
    pub fn run_trials(&mut self, count: u32, strategy: Strategy) -> Result<TrialResult> {
        if count == 0 {
            return Err(Error::InvalidTrialCount(count.to_string()));
        }

        tracing::debug!(count, %strategy, "running trials");
        let mut wins = 0;
        for _ in 0..count {
            if self.play(strategy)? {
                wins += 1;
            }
        }

        let result = TrialResult {
            strategy,
            trials: count,
            wins,
        };
        tracing::debug!(wins, win_rate = result.win_rate(), %strategy, "trials finished");
        Ok(result)
    }

    /// 先改变后坚持，各进行 `count` 轮，每轮开始和结束时回调 `progress`
    pub fn compare<F>(&mut self, count: u32, mut progress: F) -> Result<Comparison>
    where
        F: FnMut(Progress<'_>),
    {
        let mut run = |strategy: Strategy| -> Result<TrialResult> {
            progress(Progress::Started { strategy, count });
            let result = self.run_trials(count, strategy)?;
            progress(Progress::Finished(&result));
            Ok(result)
        };

        let switch = run(Strategy::Switch)?;
        let stay = run(Strategy::Stay)?;
        Ok(Comparison { switch, stay })
    }
}

/// 解析用户输入的轮数
pub fn parse_trial_count(input: &str) -> Result<u32> {
    match input.trim().parse::<u32>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(Error::InvalidTrialCount(input.trim().to_string())),
    }
}
