fn main() {
    let cmd = lazyimg::cli::get_clap_command();
    let man = clap_mangen::Man::new(cmd);
    let mut buffer: Vec<u8> = Default::default();
    man.render(&mut buffer).unwrap();
    std::fs::write("../lazyimg.1", buffer).unwrap();
}
