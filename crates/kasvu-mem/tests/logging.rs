use std::{
    io::{self, Write},
    sync::{Arc, Mutex},
};

use kasvu_log::{ColorSpec, Filters, WriteColor};
use kasvu_mem::DynArray;

#[derive(Clone, Default)]
struct SharedSink(Arc<Mutex<Vec<u8>>>);

impl SharedSink {

    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedSink {

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl WriteColor for SharedSink {

    fn supports_color(&self) -> bool {
        false
    }

    fn set_color(&mut self, _spec: &ColorSpec) -> io::Result<()> {
        Ok(())
    }

    fn reset(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn growth_and_failed_access_are_logged() {
    let sink = SharedSink::default();
    assert!(kasvu_log::init_with_sink(sink.clone(), Filters::parse("kasvu_mem=trace")));
    assert!(!kasvu_log::init_with_filters("off"));

    let mut array = DynArray::new();
    for i in 0..3 {
        array.push(i);
    }
    assert!(array.at(3).is_err());
    assert_eq!(array.at(2), Ok(&2));

    let output = sink.contents();
    assert!(output.contains("[trace] grew capacity 0 -> 1 (len 0)\n"), "{}", output);
    assert!(output.contains("[trace] grew capacity 1 -> 2 (len 1)\n"), "{}", output);
    assert!(output.contains("[trace] grew capacity 2 -> 4 (len 2)\n"), "{}", output);
    assert!(output.contains("[debug] index 3 was out of range for len 3\n"), "{}", output);
    assert_eq!(output.lines().count(), 4, "{}", output);
}
