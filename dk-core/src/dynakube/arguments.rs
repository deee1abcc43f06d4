// Parsed view of a OneAgent argv list (`--key[=value]`).  Keys keep their leading dashes, and
// repeated keys keep every value in the order they were given.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ArgumentsMap(Vec<(String, Vec<String>)>);

impl ArgumentsMap {
    pub fn parse(args: &[String]) -> ArgumentsMap {
        let mut map = ArgumentsMap::default();
        for arg in args {
            let (key, value) = arg.split_once('=').unwrap_or((arg.as_str(), ""));
            map.push(key, value);
        }
        map
    }

    fn push(&mut self, key: &str, value: &str) {
        match self.0.iter_mut().find(|(k, _)| k == key) {
            Some((_, values)) => values.push(value.into()),
            None => self.0.push((key.into(), vec![value.into()])),
        }
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_slice())
    }

    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| v.first()).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
