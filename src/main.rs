fn main() -> Result<(), Box<dyn std::error::Error>> {
    vcdaudio::runtime::run()
}
