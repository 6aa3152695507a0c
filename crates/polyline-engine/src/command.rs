/*
이 파일은 다음 내용을 포함한다.

- 그림 레이어를 조작하는 되돌릴 수 있는 command 의 정의
- Command 를 가지고 레이어를 실제로 조작하는 execute / undo 로직

설계 원칙

- Command 는 execute / undo 에 필요한 데이터만 가진다. 상속 대신 enum variant 로 구분한다.
- 레이어는 command 가 소유하지 않는다. 호출하는 쪽이 매번 빌려준다.
- redo 는 execute 를 다시 부르는 것이므로, execute 는 몇 번을 불러도 같은 결과를 만들어야 한다.
 */

use std::fmt;

use thiserror::Error;

use crate::geometry::Polyline;
use crate::surface::{PermanentSurface, SurfaceError};

pub type CommandResult<T> = Result<T, CommandError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("could not execute `{description}`: {source}")]
    ExecutionFailed {
        description: String,
        #[source]
        source: SurfaceError,
    },
    #[error("could not undo `{description}`: {source}")]
    UndoFailed {
        description: String,
        #[source]
        source: SurfaceError,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct CommitLineCommand {
    line: Polyline,
}

impl CommitLineCommand {
    pub fn new(line: Polyline) -> Self {
        Self { line }
    }

    pub fn line(&self) -> &Polyline {
        &self.line
    }

    fn execute<S: PermanentSurface + ?Sized>(&self, surface: &mut S) -> Result<(), SurfaceError> {
        surface.add(&self.line)
    }

    fn undo<S: PermanentSurface + ?Sized>(&self, surface: &mut S) -> Result<(), SurfaceError> {
        surface.remove(self.line.id)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    CommitLine(CommitLineCommand),
}

impl Command {
    pub fn commit_line(line: Polyline) -> Self {
        Command::CommitLine(CommitLineCommand::new(line))
    }

    pub fn execute<S: PermanentSurface + ?Sized>(&self, surface: &mut S) -> CommandResult<()> {
        let result = match self {
            Command::CommitLine(c) => c.execute(surface),
        };
        result.map_err(|source| CommandError::ExecutionFailed {
            description: self.description(),
            source,
        })
    }

    pub fn undo<S: PermanentSurface + ?Sized>(&self, surface: &mut S) -> CommandResult<()> {
        let result = match self {
            Command::CommitLine(c) => c.undo(surface),
        };
        result.map_err(|source| CommandError::UndoFailed {
            description: self.description(),
            source,
        })
    }

    pub fn description(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::CommitLine(c) => write!(
                f,
                "Commit line {} ({} vertices)",
                c.line.abbreviated_id(),
                c.line.points.len()
            ),
        }
    }
}
