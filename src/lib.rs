mod error;
mod trial;

pub use error::*;
pub use trial::*;

use rand::Rng;
use serde::Serialize;
use std::fmt;

/// 门数
pub const DOORS: usize = 3;

/// 一扇门，每次状态变化都返回新值
#[derive(Debug, Serialize, Copy, Clone, Eq, PartialEq)]
pub struct Door {
    /// 门后有奖品
    prize: bool,

    /// 门已被主持人打开
    open: bool,

    /// 门已被挑战者选中
    chosen: bool,
}

impl Door {
    /// 关闭且未被选中的门
    pub fn closed(prize: bool) -> Self {
        Self {
            prize,
            open: false,
            chosen: false,
        }
    }

    /// 打开后的门
    pub fn open(&self) -> Self {
        Self {
            prize: self.prize,
            open: true,
            chosen: false,
        }
    }

    /// 被选中后的门
    pub fn choose(&self) -> Self {
        Self {
            prize: self.prize,
            open: false,
            chosen: true,
        }
    }

    /// 原样复制
    pub fn leave_alone(&self) -> Self {
        *self
    }

    pub fn has_prize(&self) -> bool {
        self.prize
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_chosen(&self) -> bool {
        self.chosen
    }
}

/// 游戏状态
#[derive(Debug, Serialize, Copy, Clone, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum State {
    /// 刚刚布置好，所有门都关着
    New,

    /// 挑战者已选择，主持人已打开一扇门
    Chosen,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::New => f.write_str("new"),
            State::Chosen => f.write_str("chosen"),
        }
    }
}

/// 一局三门游戏
#[derive(Debug, Serialize, Copy, Clone, Eq, PartialEq)]
pub struct Game {
    doors: [Door; DOORS],
    state: State,
}

impl Game {
    /// 将奖品放到序号指定的门内
    pub fn setup(prize: usize) -> Result<Self> {
        if prize >= DOORS {
            return Err(Error::InvalidDoorIndex(prize));
        }
        Ok(Self::with_prize(prize))
    }

    /// 将奖品随机放到一个门内
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::with_prize(rng.gen_range(0..DOORS))
    }

    fn with_prize(prize: usize) -> Self {
        Self {
            doors: std::array::from_fn(|i| Door::closed(i == prize)),
            state: State::New,
        }
    }

    /// 挑战者选择一扇门，主持人随即打开另一扇没有奖品的门
    ///
    /// 若挑战者选中的正是奖品，剩下两扇门都可以打开，此时打开序号较小的那扇。
    pub fn choose(&self, location: usize) -> Result<Self> {
        if location >= DOORS {
            return Err(Error::InvalidDoorIndex(location));
        }
        self.expect(State::New)?;

        let mut opened = false;
        let doors = std::array::from_fn(|i| {
            let door = &self.doors[i];
            if i == location {
                door.choose()
            } else if door.has_prize() || opened {
                door.leave_alone()
            } else {
                opened = true;
                door.open()
            }
        });

        Ok(Self {
            doors,
            state: State::Chosen,
        })
    }

    /// 当前游戏状态
    pub fn state(&self) -> State {
        self.state
    }

    pub fn doors(&self) -> &[Door; DOORS] {
        &self.doors
    }

    /// 已打开的门数
    pub fn open_doors(&self) -> usize {
        self.doors.iter().filter(|door| door.is_open()).count()
    }

    /// 奖品所在门序号
    pub fn prize_box_id(&self) -> Result<usize> {
        self.doors
            .iter()
            .position(Door::has_prize)
            .ok_or(Error::NoPrize)
    }

    /// 挑战者选择的门序号
    pub fn chosen_box_id(&self) -> Result<usize> {
        self.doors
            .iter()
            .position(Door::is_chosen)
            .ok_or(Error::NoChoice)
    }

    /// 主持人打开的门序号
    pub fn opened_door_id(&self) -> Result<usize> {
        self.expect(State::Chosen)?;
        self.doors
            .iter()
            .position(Door::is_open)
            .ok_or(Error::NoOpenDoor)
    }

    /// 改变选择能否赢得奖品
    pub fn switch_wins(&self) -> Result<bool> {
        self.expect(State::Chosen)?;
        Ok(self.prize_box_id()? != self.chosen_box_id()?)
    }

    /// 坚持选择能否赢得奖品
    pub fn stay_wins(&self) -> Result<bool> {
        self.expect(State::Chosen)?;
        Ok(self.prize_box_id()? == self.chosen_box_id()?)
    }

    fn expect(&self, expected: State) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(Error::InvalidState {
                expected,
                actual: self.state,
            })
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn setup_places_prize() {
        for loc in 0..DOORS {
            let game = Game::setup(loc).unwrap();
            assert_eq!(game.prize_box_id(), Ok(loc));
            assert_eq!(game.state(), State::New);
            assert_eq!(game.open_doors(), 0);
            assert_eq!(game.chosen_box_id(), Err(Error::NoChoice));
        }
    }

    #[test]
    fn setup_rejects_out_of_range() {
        assert_eq!(Game::setup(3), Err(Error::InvalidDoorIndex(3)));
    }

    #[test]
    fn choose_prize_door_opens_lowest_other() {
        let game = Game::setup(0).unwrap().choose(0).unwrap();
        assert_eq!(game.opened_door_id(), Ok(1));
        assert!(!game.doors()[2].is_open());

        let game = Game::setup(1).unwrap().choose(1).unwrap();
        assert_eq!(game.opened_door_id(), Ok(0));
        assert_eq!(game.stay_wins(), Ok(true));
        assert_eq!(game.switch_wins(), Ok(false));
    }

    #[test]
    fn choose_empty_door_opens_the_other_empty_one() {
        let game = Game::setup(1).unwrap().choose(0).unwrap();
        assert_eq!(game.opened_door_id(), Ok(2));
        assert_eq!(game.switch_wins(), Ok(true));
        assert_eq!(game.stay_wins(), Ok(false));
    }

    #[test]
    fn choose_leaves_original_untouched() {
        let game = Game::setup(2).unwrap();
        let first = game.choose(0).unwrap();
        let second = game.choose(1).unwrap();

        assert_eq!(game.state(), State::New);
        assert_eq!(game.open_doors(), 0);
        assert_eq!(first.chosen_box_id(), Ok(0));
        assert_eq!(second.chosen_box_id(), Ok(1));
    }

    #[test]
    fn choose_twice_fails() {
        let game = Game::setup(0).unwrap().choose(2).unwrap();
        assert_eq!(
            game.choose(1),
            Err(Error::InvalidState {
                expected: State::New,
                actual: State::Chosen,
            })
        );
    }

    #[test]
    fn choose_rejects_out_of_range() {
        let game = Game::setup(0).unwrap();
        assert_eq!(game.choose(7), Err(Error::InvalidDoorIndex(7)));
    }

    #[test]
    fn queries_require_chosen_state() {
        let game = Game::setup(0).unwrap();
        let err = Error::InvalidState {
            expected: State::Chosen,
            actual: State::New,
        };
        assert_eq!(game.switch_wins(), Err(err.clone()));
        assert_eq!(game.stay_wins(), Err(err.clone()));
        assert_eq!(game.opened_door_id(), Err(err));
    }

    #[test]
    fn door_transitions() {
        let door = Door::closed(false);
        assert!(door.open().is_open());
        assert!(!door.open().is_chosen());
        assert!(door.choose().is_chosen());
        assert!(!door.choose().is_open());
        assert_eq!(door.leave_alone(), door);
        assert!(!door.is_open());
    }

    #[test]
    fn random_games_have_one_prize() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; DOORS];
        for _ in 0..1000 {
            let game = Game::random(&mut rng);
            let prizes = game.doors().iter().filter(|d| d.has_prize()).count();
            assert_eq!(prizes, 1);
            seen[game.prize_box_id().unwrap()] = true;
        }
        assert_eq!(seen, [true; DOORS]);
    }

    #[test]
    fn serialize_game() {
        let game = Game::setup(2).unwrap().choose(2).unwrap();
        let value = serde_json::to_value(game).unwrap();
        assert_eq!(value["state"], "chosen");
        assert_eq!(value["doors"][0]["open"], true);
        assert_eq!(value["doors"][2]["chosen"], true);
        assert_eq!(value["doors"][2]["prize"], true);
    }

    proptest! {
        #[test]
        fn chosen_game_invariants(prize in 0..DOORS, chosen in 0..DOORS) {
            let game = Game::setup(prize).unwrap().choose(chosen).unwrap();
            prop_assert_eq!(game.state(), State::Chosen);
            prop_assert_eq!(game.open_doors(), 1);

            let opened = game.opened_door_id().unwrap();
            prop_assert_ne!(opened, chosen);
            prop_assert_ne!(opened, prize);
            prop_assert!(!game.doors()[opened].has_prize());
            prop_assert!(!game.doors()[opened].is_chosen());

            let switch = game.switch_wins().unwrap();
            let stay = game.stay_wins().unwrap();
            prop_assert_ne!(switch, stay);
            prop_assert_eq!(stay, prize == chosen);
        }
    }
}
