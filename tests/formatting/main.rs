mod highlighting;
