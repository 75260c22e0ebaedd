//! Input coordinator, which keeps every piece of input around so diagnostics
//! can show the code they're about.

use std::path::PathBuf;

/// A unique ID that corresponds to a piece of input tracked by an
/// [`InputCoordinator`].
#[derive(Debug, Clone, Copy, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub struct InputId(usize);

#[derive(Debug, Default)]
pub struct InputCoordinator {
    /// Inputs, where [`InputId`] are the corresponding indexes.
    inputs: Vec<Input>,
}

impl InputCoordinator {
    fn push(&mut self, buffer: String, name: Name) -> InputId {
        let id = InputId(self.inputs.len());
        self.inputs.push(Input { name, buffer });
        id
    }

    /// Track a line (or block) entered at the REPL.
    pub fn repl_input(&mut self, buffer: String) -> InputId {
        self.push(buffer, Name::Repl)
    }

    /// Track code passed on the command line.
    pub fn eval_input(&mut self, buffer: String) -> InputId {
        self.push(buffer, Name::Eval)
    }

    /// Track the contents of a file loaded from `path`.
    pub fn file_input(&mut self, buffer: String, path: PathBuf) -> InputId {
        self.push(buffer, Name::File(path))
    }

    pub fn get_input_buffer(&self, id: InputId) -> &str {
        self.inputs[id.0].buffer.as_str()
    }

    /// A name for the input that's suitable for showing users.
    pub fn get_input_name(&self, id: InputId) -> String {
        match &self.inputs[id.0].name {
            Name::File(path) => format!("{}", path.display()),
            Name::Repl => format!("<repl {}>", id.0),
            Name::Eval if id.0 == 0 => "<eval>".into(),
            Name::Eval => format!("<eval-{}>", id.0),
        }
    }
}

#[derive(Debug)]
struct Input {
    name: Name,
    buffer: String,
}

/// Where a piece of input came from.
#[derive(Debug)]
enum Name {
    Repl,
    Eval,
    File(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        let mut inputs = InputCoordinator::default();
        let eval = inputs.eval_input("1".into());
        let file = inputs.file_input("2".into(), PathBuf::from("BUILD"));
        let repl = inputs.repl_input("3".into());

        assert_eq!(inputs.get_input_name(eval), "<eval>");
        assert_eq!(inputs.get_input_name(file), "BUILD");
        assert_eq!(inputs.get_input_name(repl), "<repl 2>");
        assert_eq!(inputs.get_input_buffer(file), "2");
    }
}
