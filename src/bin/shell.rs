//! 局面を対話的に操作するシェル。

use std::ops::ControlFlow;

use anyhow::{bail, Context as _};
use clap::arg_enum;
use log::LevelFilter;
use structopt::StructOpt;

use shogi_position::*;

arg_enum! {
    /// ログレベル。
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    enum LogLevel {
        Off,
        Error,
        Warn,
        Info,
        Debug,
        Trace,
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => Self::Off,
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

#[derive(Debug, StructOpt)]
struct Opt {
    /// 初期局面の手合割。
    #[structopt(long, possible_values = &Preset::variants(), case_insensitive = true, default_value = "HIRATE")]
    preset: Preset,

    /// 初期局面の sfen 文字列。指定した場合は --preset より優先される。
    #[structopt(long)]
    sfen: Option<String>,

    #[structopt(long, possible_values = &LogLevel::variants(), case_insensitive = true, default_value = "Warn")]
    log_level: LogLevel,
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::from_args();

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}", record.level(), message))
        })
        .level(opt.log_level.into())
        .chain(std::io::stderr())
        .apply()?;

    let pos = match &opt.sfen {
        Some(sfen) => Position::from_sfen(sfen)?,
        None => Position::from_preset(opt.preset),
    };

    let mut shell = Shell::new(pos);

    shell.interact()?;

    Ok(())
}

#[derive(Debug)]
struct Shell {
    pos: Position,
    history: Vec<UndoableMove>,
}

impl Shell {
    fn new(pos: Position) -> Self {
        Self {
            pos,
            history: vec![],
        }
    }

    fn interact(&mut self) -> anyhow::Result<()> {
        use std::io::Write as _;

        self.print_position();

        loop {
            println!();
            print!("shell > ");
            std::io::stdout().flush()?;

            let mut line = String::new();
            if std::io::stdin().read_line(&mut line)? == 0 {
                break;
            }

            let tokens: Vec<_> = line.split_ascii_whitespace().collect();
            let (cmd, args) = match tokens.split_first() {
                Some((cmd, args)) => (*cmd, args),
                None => continue,
            };

            match self.do_command(cmd, args) {
                Ok(ControlFlow::Break(_)) => break,
                Err(e) => println!("error: {:#}", e),
                _ => {}
            }
        }

        Ok(())
    }

    fn do_command(&mut self, cmd: &str, args: &[&str]) -> anyhow::Result<ControlFlow<()>> {
        match cmd {
            "quit" => return Ok(ControlFlow::Break(())),
            "move" => self.do_command_move(args)?,
            "undo" => self.do_command_undo()?,
            "print" => self.print_position(),
            "sfen" => self.do_command_sfen(args)?,
            "csa" => println!("{}", self.pos.to_csa()),
            "check" => {
                for color in Color::iter() {
                    println!("{}: {}", color, self.pos.is_check(color));
                }
            }
            "moves" => self.do_command_moves(args)?,
            "drops" => self.do_command_drops(args)?,
            "edit" => self.do_command_edit(args)?,
            "flip" => {
                let sq = parse_square(arg(args, 0)?)?;
                if !self.pos.flip(sq)? {
                    println!("no piece at {:?}", sq);
                }
                self.print_position();
            }
            "capture" => {
                let sq = parse_square(arg(args, 0)?)?;
                let color = parse_color(arg(args, 1)?)?;
                self.pos.capture_by_color(sq, color)?;
                self.print_position();
            }
            "turn" => {
                self.pos.set_turn(parse_color(arg(args, 0)?)?)?;
                self.print_position();
            }
            _ => bail!("unknown command: {}", cmd),
        }

        Ok(ControlFlow::Continue(()))
    }

    fn do_command_move(&mut self, args: &[&str]) -> anyhow::Result<()> {
        let mv = sfen_decode_move(arg(args, 0)?)?;

        let umv = self.pos.do_move(mv)?;
        self.history.push(umv);

        self.print_position();

        Ok(())
    }

    fn do_command_undo(&mut self) -> anyhow::Result<()> {
        let umv = self.history.pop().context("history is empty")?;

        if let Err(e) = self.pos.undo_move(umv) {
            self.history.push(umv);
            return Err(e.into());
        }

        self.print_position();

        Ok(())
    }

    fn do_command_sfen(&self, args: &[&str]) -> anyhow::Result<()> {
        let move_count = match args.first() {
            Some(s) => s.parse().context("invalid move count")?,
            None => 1,
        };

        println!("{}", self.pos.to_sfen(move_count));

        Ok(())
    }

    fn do_command_moves(&self, args: &[&str]) -> anyhow::Result<()> {
        let sq = parse_square(arg(args, 0)?)?;

        let mvs: Vec<_> = self
            .pos
            .moves_from(sq)
            .into_iter()
            .map(sfen_encode_move)
            .collect();
        println!("{}", mvs.join(" "));

        Ok(())
    }

    fn do_command_drops(&self, args: &[&str]) -> anyhow::Result<()> {
        let color = match args.first() {
            Some(s) => parse_color(s)?,
            None => self.pos.turn(),
        };

        let mvs: Vec<_> = self
            .pos
            .drops_by(color)
            .into_iter()
            .map(sfen_encode_move)
            .collect();
        println!("{}", mvs.join(" "));

        Ok(())
    }

    fn do_command_edit(&mut self, args: &[&str]) -> anyhow::Result<()> {
        let flag = match arg(args, 0)? {
            "on" => true,
            "off" => false,
            s => bail!("expected on/off: {}", s),
        };

        self.pos.set_edit_mode(flag);
        // 編集前の履歴は編集後の局面には適用できない。
        self.history.clear();

        Ok(())
    }

    fn print_position(&self) {
        print!("{}", self.pos);
    }
}

fn arg<'a>(args: &[&'a str], i: usize) -> anyhow::Result<&'a str> {
    args.get(i)
        .copied()
        .with_context(|| format!("argument #{} is not specified", i + 1))
}

/// "76" のように筋と段を数字 2 桁で書いたマスをパースする。
fn parse_square(s: &str) -> anyhow::Result<Square> {
    let ds: Vec<_> = s.chars().map(|c| c.to_digit(10)).collect();

    match ds.as_slice() {
        &[Some(x), Some(y)] => {
            Square::new(x as i32, y as i32).with_context(|| format!("square out of board: {}", s))
        }
        _ => bail!("invalid square: {}", s),
    }
}

fn parse_color(s: &str) -> anyhow::Result<Color> {
    match s {
        "b" | "black" => Ok(BLACK),
        "w" | "white" => Ok(WHITE),
        _ => bail!("invalid color: {}", s),
    }
}
