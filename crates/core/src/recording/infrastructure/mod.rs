pub mod ffmpeg_recorder;
