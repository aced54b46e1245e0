mod test_levels;
