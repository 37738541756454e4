use std::fmt::Write;
use std::fs::File;
use std::io::{self, BufRead};

use crate::hand::{Board, BoardInput};
use crate::model::*;
use crate::util::log;
use crate::util::misc::*;

use crate::error;

#[derive(Debug)]
pub struct CalculatorApp {
    args: Vec<String>,
    detail: bool,
    json: bool,
}

impl CalculatorApp {
    pub fn new(args: Vec<String>) -> Self {
        Self {
            args,
            detail: false,
            json: false,
        }
    }

    pub fn run(&mut self) {
        let mut file_path = "".to_string();
        let mut input_path = "".to_string();
        let mut exp = "".to_string();
        let mut it = self.args.iter();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-d" => {
                    self.detail = true;
                    log::set_max_level(log::Level::Debug);
                }
                "-j" => self.json = true,
                "-f" => file_path = next_value(&mut it, s),
                "-i" => input_path = next_value(&mut it, s),
                _ => {
                    if s.starts_with('-') {
                        error!("unknown option: {}", s);
                        return;
                    }
                    if !exp.is_empty() {
                        error!("multiple expression is not allowed");
                        return;
                    }
                    exp = s.clone();
                }
            }
        }

        let sources = [&exp, &file_path, &input_path]
            .iter()
            .filter(|s| !s.is_empty())
            .count();
        if sources != 1 {
            print_usage();
            return;
        }

        let res = if !exp.is_empty() {
            self.process_expression(&exp)
        } else if !file_path.is_empty() {
            self.run_from_file(&file_path)
        } else {
            self.run_from_json(&input_path)
        };
        if let Err(e) = res {
            error!("{}", e);
        }
    }

    fn run_from_file(&self, file_path: &str) -> Res {
        let file = File::open(file_path)?;
        let lines = io::BufReader::new(file).lines();
        for exp in lines.map_while(Result::ok) {
            let e = exp.replace(' ', "");
            if e.is_empty() || e.starts_with('#') {
                // 空行とコメント行はスキップ
                println!("> {}", exp);
            } else if let Err(e) = self.process_expression(&exp) {
                error!("{}", e);
            }
            println!();
        }
        Ok(())
    }

    fn run_from_json(&self, input_path: &str) -> Res {
        let file = File::open(input_path)?;
        let input: BoardInput = serde_json::from_reader(io::BufReader::new(file))?;
        let board = input.into_board();
        self.print_board(&board)?;
        Ok(())
    }

    fn process_expression(&self, exp: &str) -> Res {
        let mut calculator = Calculator::new(self.detail);
        calculator.parse(exp)?;
        if self.json {
            self.print_board(&calculator.board)?;
        } else {
            calculator.run();
        }
        Ok(())
    }

    fn print_board(&self, board: &Board) -> Res {
        let ev = board.evaluation();
        if self.detail {
            println!("{}", serde_json::to_string_pretty(&ev)?);
        } else {
            println!("{}", serde_json::to_string(&ev)?);
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq)]
enum Verify {
    Ok,
    Error,
    Skip,
}

#[derive(Debug)]
struct Calculator {
    detail: bool,
    board: Board,
    // score verify
    verify: bool,
    fu: u32,
    han: u32,
    base: u32,
}

impl Calculator {
    fn new(detail: bool) -> Self {
        Self {
            detail,
            board: Board::new(),
            verify: false,
            fu: 0,
            han: 0,
            base: 0,
        }
    }

    // HAND[+],MELD,.../PS,DORA,DISCARDS/FLAG,.../FU,HAN,BASE
    fn parse(&mut self, input: &str) -> Res {
        println!("> {}", input);

        let input = input.replace(' ', "");
        let input = input.split('#').collect::<Vec<&str>>()[0]; // コメント削除
        let exps: Vec<&str> = input.split('/').collect();
        let len = exps.len();
        if len > 0 {
            self.parse_hand_meld(exps[0])?;
        }
        if len > 1 {
            self.parse_stage_info(exps[1])?;
        }
        if len > 2 {
            self.parse_flags(exps[2])?;
        }
        if len > 3 {
            self.parse_score_verify(exps[3])?;
        }

        if self.detail {
            println!("{:?}", self.board);
        }

        Ok(())
    }

    fn run(&self) -> Verify {
        let b = &self.board;
        println!("groups: {}", groups_to_string(b.all_groups()));

        let score = match (b.validate(), b.score()) {
            (None, Some(s)) => s,
            (e, _) => {
                for msg in e.iter().flat_map(|e| e.lines()) {
                    println!("invalid: {}", msg);
                }
                println!("not win hand");
                let verify = if !self.verify {
                    Verify::Skip
                } else if self.base == 0 {
                    Verify::Ok
                } else {
                    Verify::Error
                };
                println!("verify: {:?}", verify);
                return verify;
            }
        };

        let mut wins = "".to_string();
        for w in b.wins() {
            let _ = write!(wins, "{}({}), ", w.name, w.han(b.is_closed_hand()).unwrap_or(0));
        }
        println!("wins: {}", wins);
        println!(
            "fu: {}, han: {}, yaakuman: {:?}, base: {}, {}",
            score.fu, score.han, score.yaakuman, score.base_points, score.title
        );
        println!("{}", score.settlement);

        let verify = if !self.verify {
            Verify::Skip
        } else if score.yaakuman != Yaakuman::None {
            // 役満は基本点のみをチェック
            if score.base_points == self.base {
                Verify::Ok
            } else {
                Verify::Error
            }
        } else if score.fu == self.fu && score.han == self.han && score.base_points == self.base {
            Verify::Ok
        } else {
            Verify::Error
        };
        println!("verify: {:?}", verify);
        verify
    }

    // 最後の牌が和了牌. 末尾の'+'はロン
    fn parse_hand_meld(&mut self, input: &str) -> Res {
        let mut exp_hand = "".to_string();
        let mut melds = vec![];
        let mut tsumo = true;
        for exp in input.split(',') {
            if exp_hand.is_empty() {
                if exp.ends_with('+') {
                    tsumo = false;
                }
                exp_hand = exp.replace('+', "");
            } else {
                melds.push(tiles_from_string(exp)?);
            }
        }

        let mut hidden = tiles_from_string(&exp_hand)?;
        let winning = match hidden.pop() {
            Some(t) => t,
            None => Err(format!("hand is empty: {}", input))?,
        };

        self.board.set_hidden(hidden);
        self.board.set_winning(winning);
        self.board.set_revealed(melds);
        self.board.set_tsumo(tsumo);
        Ok(())
    }

    // 場風, 自風の順
    fn parse_stage_info(&mut self, input: &str) -> Res {
        let exps: Vec<&str> = input.split(',').collect();
        let len = exps.len();
        if len > 0 {
            let chars: Vec<char> = exps[0].chars().collect();
            if chars.len() != 2 {
                Err(format!("stage info len is not 2: {}", exps[0]))?;
            }
            self.board.set_prevalent_wind(wind_from_char(chars[0])?);
            self.board.set_seat_wind(wind_from_char(chars[1])?);
        }
        if len > 1 {
            self.board.set_dora(tiles_from_string(exps[1])?);
        }
        if len > 2 {
            self.board.set_discards(tiles_from_string(exps[2])?);
        }
        Ok(())
    }

    fn parse_flags(&mut self, input: &str) -> Res {
        for f in input.split(',') {
            match f {
                "riichi" => self.board.set_riichi(true),
                "double_riichi" => self.board.set_double_riichi(true),
                "ippatsu" => self.board.set_ippatsu(true),
                "kan" => self.board.set_kan_win(true),
                "last" => self.board.set_last_draw_win(true),
                "" => {}
                _ => Err(format!("invalid situation flag: {}", f))?,
            }
        }
        Ok(())
    }

    fn parse_score_verify(&mut self, input: &str) -> Res {
        let exps: Vec<&str> = input.split(',').collect();
        if exps.len() != 3 {
            Err(format!("invalid score verify info: {}", input))?;
        }
        self.fu = exps[0].parse::<u32>()?;
        self.han = exps[1].parse::<u32>()?;
        self.base = exps[2].parse::<u32>()?;
        self.verify = true;
        Ok(())
    }
}

fn wind_from_char(c: char) -> Res<Rank> {
    let r = match c {
        'E' => Rank::EastWind,
        'S' => Rank::SouthWind,
        'W' => Rank::WestWind,
        'N' => Rank::NorthWind,
        _ => Err(format!("invalid wind char: {}", c))?,
    };
    Ok(r)
}

fn print_usage() {
    error!(
        r"invalid input
Usage
    $ cargo run C EXPRESSION [-d] [-j]
    $ cargo run C -f FILE [-d] [-j]
    $ cargo run C -i JSON_FILE [-d]
Expression
    HAND[+],MELD,.../PS,DORA,DISCARDS/FLAG,.../FU,HAN,BASE
    the last tile of HAND is the winning tile, '+' means ron
    PS: prevalent wind and seat wind (E, S, W, N)
    FLAG: riichi, double_riichi, ippatsu, kan, last
Options
    -d: print debug info
    -f: read expressions from file instead of a commandline expression
    -j: print the evaluation as json
    -i: read a json board input
"
    );
}

#[test]
fn test_parse_expression() {
    let mut c = Calculator::new(false);
    c.parse("2b3b4b4d5d6d7n8n9n2d2d,xxgdgdxx+/ES,1d,9b9b/riichi,ippatsu/0,5,2000")
        .unwrap();
    let b = &c.board;
    assert_eq!(b.hidden().len(), 10);
    assert_eq!(b.winning().map(|t| t.to_string()), Some("2d".to_string()));
    assert_eq!(b.revealed().len(), 1);
    assert!(!b.situation().tsumo);
    assert!(b.situation().riichi && b.situation().ippatsu);
    assert_eq!(b.situation().prevalent_wind, Rank::EastWind);
    assert_eq!(b.situation().seat_wind, Rank::SouthWind);
    assert_eq!(tiles_to_string(b.dora()), "[1d]");
    assert_eq!((c.fu, c.han, c.base), (0, 5, 2000));
    assert_eq!(c.run(), Verify::Ok);

    assert!(Calculator::new(false).parse("2b3b/EX").is_err());
    assert!(Calculator::new(false).parse("2b3b/EE/tenhou").is_err());
    assert!(Calculator::new(false).parse("2b3b/EE//30,1").is_err());
    assert!(Calculator::new(false).parse("+").is_err());
}

#[test]
fn test_calculator() {
    let file = File::open("tests/win_hands.txt").unwrap();
    let lines = io::BufReader::new(file).lines();
    for exp in lines.map_while(Result::ok) {
        let e = exp.replace(' ', "");
        if e.is_empty() || e.starts_with('#') {
            // 空行とコメント行はスキップ
            println!("> {}", exp);
        } else {
            let mut calculator = Calculator::new(false);
            calculator.parse(&e).unwrap();
            assert_eq!(Verify::Ok, calculator.run(), "{}", exp);
        }
    }
}
